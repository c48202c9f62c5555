//! Supporters Module
//!
//! Giveaway applications from the supporters landing page. Much simpler
//! than booking: no capacity accounting, just a validated append plus
//! the listing and counter reads.

use shared::{SortOrder, Supporter, SupporterApplyRequest, SupporterDraft};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::db::repository::{RepoError, RepoResult, SupporterRepository};

#[derive(Debug, Error)]
pub enum SupporterError {
    #[error("Please select a product set")]
    ProductNotSelected,

    #[error("Please consent to the collection and use of personal information")]
    ConsentRequired,

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Validate an application form (pure, no store interaction)
///
/// Ordered like the booking guard: selection first, then consent.
pub fn validate_application(
    request: &SupporterApplyRequest,
) -> Result<SupporterDraft, SupporterError> {
    let product = match request.product.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(SupporterError::ProductNotSelected),
    };
    if !request.agreed {
        return Err(SupporterError::ConsentRequired);
    }
    Ok(SupporterDraft {
        name: request.name.clone(),
        phone: request.phone.clone(),
        blog_id: request.blog_id.clone(),
        address: request.address.clone(),
        product: product.to_string(),
        agreed: request.agreed,
    })
}

#[derive(Clone)]
pub struct SupporterService {
    repo: SupporterRepository,
}

impl SupporterService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: SupporterRepository::new(db),
        }
    }

    /// Submit an application
    pub async fn apply(&self, request: SupporterApplyRequest) -> Result<Supporter, SupporterError> {
        let draft = validate_application(&request)?;
        let created = self.repo.create(draft).await?;
        tracing::info!(
            id = created.id.as_deref().unwrap_or("?"),
            product = %created.product,
            "Supporter application accepted"
        );
        Ok(created)
    }

    /// Admin listing, newest first by default
    pub async fn list(&self, order: SortOrder) -> RepoResult<Vec<Supporter>> {
        self.repo.find_all(order).await
    }

    /// Application count for the landing-page counter
    pub async fn count(&self) -> RepoResult<u64> {
        self.repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request() -> SupporterApplyRequest {
        SupporterApplyRequest {
            name: "Hong Gildong".into(),
            phone: "010-0000-0000".into(),
            blog_id: "blog.example.com/hong".into(),
            address: "Seoul".into(),
            product: Some("A".into()),
            agreed: true,
        }
    }

    #[test]
    fn valid_application_becomes_a_draft() {
        let draft = validate_application(&make_request()).unwrap();
        assert_eq!(draft.product, "A");
        assert_eq!(draft.name, "Hong Gildong");
    }

    #[test]
    fn missing_product_wins_over_missing_consent() {
        let mut req = make_request();
        req.product = None;
        req.agreed = false;
        assert!(matches!(
            validate_application(&req).unwrap_err(),
            SupporterError::ProductNotSelected
        ));
    }

    #[test]
    fn empty_product_counts_as_unselected() {
        let mut req = make_request();
        req.product = Some(String::new());
        assert!(matches!(
            validate_application(&req).unwrap_err(),
            SupporterError::ProductNotSelected
        ));
    }

    #[test]
    fn consent_is_required() {
        let mut req = make_request();
        req.agreed = false;
        assert!(matches!(
            validate_application(&req).unwrap_err(),
            SupporterError::ConsentRequired
        ));
    }
}
