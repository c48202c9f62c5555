//! Supporter Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::SupporterRow;
use chrono::Utc;
use serde::Deserialize;
use shared::{SortOrder, Supporter, SupporterDraft};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "supporters";

#[derive(Clone)]
pub struct SupporterRepository {
    base: BaseRepository,
}

#[derive(Deserialize)]
struct CountRow {
    total: u64,
}

impl SupporterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all applications, ordered by creation time
    pub async fn find_all(&self, order: SortOrder) -> RepoResult<Vec<Supporter>> {
        let sql = match order {
            SortOrder::Asc => "SELECT * FROM supporters ORDER BY created_at ASC",
            SortOrder::Desc => "SELECT * FROM supporters ORDER BY created_at DESC",
        };
        let rows: Vec<SupporterRow> = self.base.db().query(sql).await?.take(0)?;
        Ok(rows.into_iter().map(Supporter::from).collect())
    }

    /// Total number of applications (landing-page counter)
    pub async fn count(&self) -> RepoResult<u64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS total FROM supporters GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    /// Create a new application
    pub async fn create(&self, draft: SupporterDraft) -> RepoResult<Supporter> {
        let row = SupporterRow::from_domain(Supporter {
            id: None,
            name: draft.name,
            phone: draft.phone,
            blog_id: draft.blog_id,
            address: draft.address,
            product: draft.product,
            agreed: draft.agreed,
            created_at: Utc::now(),
        });
        let created: Option<SupporterRow> = self.base.db().create(TABLE).content(row).await?;
        created
            .map(Supporter::from)
            .ok_or_else(|| RepoError::Database("Failed to create supporter application".into()))
    }
}
