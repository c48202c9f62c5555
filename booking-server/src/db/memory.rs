//! In-memory reservation store
//!
//! Vec-backed [`ReservationStore`] with the same snapshot semantics as
//! the SurrealDB implementation. Used by the test suites and handy for
//! local runs without a database directory.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use shared::{Reservation, ReservationDraft, ReservationStatus, SortOrder};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::repository::{RepoError, RepoResult};
use super::store::{ReservationStore, Snapshot, SnapshotSubscription};

pub struct MemoryReservationStore {
    records: RwLock<Vec<Reservation>>,
    snapshots: broadcast::Sender<Snapshot>,
    fail_appends: AtomicBool,
}

impl MemoryReservationStore {
    pub fn new() -> Self {
        let (snapshots, _) = broadcast::channel(64);
        Self {
            records: RwLock::new(Vec::new()),
            snapshots,
            fail_appends: AtomicBool::new(false),
        }
    }

    /// Make every subsequent append fail with a store error, to drive
    /// the transient-failure path in tests.
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Seed a record directly, bypassing the guard (test setup)
    pub fn seed(&self, reservation: Reservation) {
        let mut records = self.records.write();
        let mut r = reservation;
        if r.id.is_none() {
            r.id = Some(format!("kids_class_reservations:{}", Uuid::new_v4()));
        }
        records.push(r);
        let snapshot = Arc::new(records.clone());
        drop(records);
        let _ = self.snapshots.send(snapshot);
    }

    fn current_snapshot(&self) -> Snapshot {
        Arc::new(self.records.read().clone())
    }

    fn broadcast(&self) {
        let _ = self.snapshots.send(self.current_snapshot());
    }
}

impl Default for MemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn subscribe(&self) -> RepoResult<SnapshotSubscription> {
        let receiver = self.snapshots.subscribe();
        Ok(SnapshotSubscription {
            initial: self.current_snapshot(),
            receiver,
        })
    }

    async fn query_once(&self, order: SortOrder) -> RepoResult<Vec<Reservation>> {
        let mut all = self.records.read().clone();
        match order {
            SortOrder::Asc => all.sort_by_key(|r| r.created_at),
            SortOrder::Desc => {
                all.sort_by_key(|r| r.created_at);
                all.reverse();
            }
        }
        Ok(all)
    }

    async fn append(&self, draft: ReservationDraft) -> RepoResult<Reservation> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(RepoError::Database("simulated append failure".into()));
        }
        let mut reservation = draft.into_pending(Utc::now());
        reservation.id = Some(format!("kids_class_reservations:{}", Uuid::new_v4()));
        self.records.write().push(reservation.clone());
        self.broadcast();
        Ok(reservation)
    }

    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        let updated = {
            let mut records = self.records.write();
            let record = records
                .iter_mut()
                .find(|r| r.id.as_deref() == Some(id))
                .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;
            if !record.status.can_transition_to(status) {
                return Err(RepoError::Conflict(format!(
                    "Cannot change reservation {} from {} to {}",
                    id, record.status, status
                )));
            }
            record.status = status;
            record.clone()
        };
        self.broadcast();
        Ok(updated)
    }
}
