//! Submission Guard
//!
//! Gates admission of a new reservation: an ordered, fail-fast
//! validation chain followed by an advisory capacity re-check against
//! the tally captured at submit time, then a single atomic append.
//!
//! The capacity check is deliberately advisory. The tally is a
//! client-local cache of the store and can be stale relative to
//! concurrent submitters, so two clients can both observe "1 remaining"
//! and both be admitted, overbooking the slot by one. That race is
//! accepted policy: it is rare, and the admin dashboard reconciles it
//! by confirming or cancelling the overflow booking. Replacing it with
//! a transactional check would also reject legitimate last-seat
//! submissions that previously race-won, so it must not happen here as
//! a side effect of refactoring.

use shared::{Reservation, ReservationDraft, ReservationStatus, SortOrder, SubmitReservationRequest};
use std::sync::Arc;
use thiserror::Error;

use super::availability::AvailabilityService;
use super::tally::SlotTally;
use crate::catalog::ClassCatalog;
use crate::db::repository::{RepoError, RepoResult};
use crate::db::store::ReservationStore;

/// Rejection reasons, one per validation step (first violation wins)
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Please select a class")]
    ClassNotSelected,

    #[error("Please select a preferred date and time")]
    SlotNotSelected,

    #[error("Please consent to the collection and use of personal information")]
    ConsentRequired,

    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Slot '{slot_id}' is not offered for class '{class_id}'")]
    UnknownSlot { class_id: String, slot_id: String },

    #[error("This class is open to children aged {min} to {max}")]
    AgeOutOfRange { min: u8, max: u8 },

    #[error("The selected time just filled up. Please choose another slot")]
    SlotFull { slot_id: String },

    /// Transient store failure: the attempt is over, the user retries.
    /// Entered form values are kept client-side.
    #[error(transparent)]
    Store(#[from] RepoError),
}

impl SubmissionError {
    /// Capacity-race rejections clear the selected slot on the form so
    /// the user must re-choose; every other rejection leaves the form
    /// untouched.
    pub fn clears_selected_slot(&self) -> bool {
        matches!(self, SubmissionError::SlotFull { .. })
    }
}

/// Run the ordered validation chain against a captured tally
///
/// Pure: no store interaction happens here, so every rejection this
/// function produces is guaranteed to have written nothing.
pub fn admit(
    request: &SubmitReservationRequest,
    catalog: &ClassCatalog,
    tally: &SlotTally,
) -> Result<ReservationDraft, SubmissionError> {
    // 1. A class must be selected
    let class_id = match request.class_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(SubmissionError::ClassNotSelected),
    };

    // 2. A slot must be selected
    let slot_id = match request.slot_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(SubmissionError::SlotNotSelected),
    };

    // 3. Personal-data consent
    if !request.agreed {
        return Err(SubmissionError::ConsentRequired);
    }

    let class = catalog
        .class(class_id)
        .ok_or_else(|| SubmissionError::UnknownClass(class_id.to_string()))?;
    if !class.has_slot(slot_id) {
        return Err(SubmissionError::UnknownSlot {
            class_id: class_id.to_string(),
            slot_id: slot_id.to_string(),
        });
    }

    // 4. Age must parse and fall within the class's configured bound.
    // Unparseable input gets the same user-facing reason as an
    // out-of-range age.
    let age_error = SubmissionError::AgeOutOfRange {
        min: class.age.min,
        max: class.age.max,
    };
    let age: u8 = match request.child_age.trim().parse() {
        Ok(age) => age,
        Err(_) => return Err(age_error),
    };
    if !class.age.contains(age) {
        return Err(age_error);
    }

    // 5. Advisory capacity re-check against the captured tally
    let capacity = catalog.effective_capacity(slot_id);
    if tally.remaining(slot_id, capacity) == 0 {
        return Err(SubmissionError::SlotFull {
            slot_id: slot_id.to_string(),
        });
    }

    Ok(ReservationDraft {
        guardian_name: request.guardian_name.clone(),
        phone: request.phone.clone(),
        child_name: request.child_name.clone(),
        child_age: age,
        class_id: class_id.to_string(),
        slot_id: slot_id.to_string(),
        note: request.note.clone(),
        depositor_name: request.depositor_name.clone(),
        agreed: request.agreed,
    })
}

/// Reservation submission and admin operations over the injected store
#[derive(Clone)]
pub struct ReservationService {
    store: Arc<dyn ReservationStore>,
    catalog: Arc<ClassCatalog>,
    availability: AvailabilityService,
}

impl ReservationService {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        catalog: Arc<ClassCatalog>,
        availability: AvailabilityService,
    ) -> Self {
        Self {
            store,
            catalog,
            availability,
        }
    }

    /// Submit a reservation request
    ///
    /// The tally is captured once, before validation; the admission
    /// decision is made against that value even if a fresh snapshot
    /// arrives while the append is in flight. No retroactive
    /// re-validation.
    pub async fn submit(
        &self,
        request: SubmitReservationRequest,
    ) -> Result<Reservation, SubmissionError> {
        let tally = self.availability.current();
        let draft = admit(&request, &self.catalog, &tally)?;

        let created = self.store.append(draft).await?;
        tracing::info!(
            id = created.id.as_deref().unwrap_or("?"),
            slot = %created.slot_id,
            "Reservation accepted"
        );
        Ok(created)
    }

    /// One-shot listing for the admin dashboard
    pub async fn list(&self, order: SortOrder) -> RepoResult<Vec<Reservation>> {
        self.store.query_once(order).await
    }

    /// Admin confirm / cancel
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        let updated = self.store.update_status(id, status).await?;
        tracing::info!(id = id, status = %updated.status, "Reservation status updated");
        Ok(updated)
    }
}
