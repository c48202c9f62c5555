//! Reservation Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::ReservationRow;
use chrono::Utc;
use shared::{Reservation, ReservationDraft, ReservationStatus, SortOrder};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "kids_class_reservations";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all reservations, ordered by creation time
    pub async fn find_all(&self, order: SortOrder) -> RepoResult<Vec<Reservation>> {
        let sql = match order {
            SortOrder::Asc => "SELECT * FROM kids_class_reservations ORDER BY created_at ASC",
            SortOrder::Desc => "SELECT * FROM kids_class_reservations ORDER BY created_at DESC",
        };
        let rows: Vec<ReservationRow> = self.base.db().query(sql).await?.take(0)?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    /// Find a reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let row: Option<ReservationRow> = self.base.db().select(thing).await?;
        Ok(row.map(Reservation::from))
    }

    /// Append a new pending reservation. The creation timestamp is
    /// assigned here, on the store side, never by the submitting client.
    pub async fn create(&self, draft: ReservationDraft) -> RepoResult<Reservation> {
        let row = ReservationRow::from_domain(draft.into_pending(Utc::now()));
        let created: Option<ReservationRow> = self.base.db().create(TABLE).content(row).await?;
        created
            .map(Reservation::from)
            .ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Update a reservation's status (admin confirm / cancel)
    ///
    /// Only `pending -> confirmed` and `pending -> cancelled` are legal;
    /// records are never hard-deleted.
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;

        if !existing.status.can_transition_to(status) {
            return Err(RepoError::Conflict(format!(
                "Cannot change reservation {} from {} to {}",
                id, existing.status, status
            )));
        }

        self.base
            .db()
            .query("UPDATE $thing SET status = $status")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }
}
