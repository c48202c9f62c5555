//! Reservation store boundary
//!
//! The booking core never touches the database directly: it is written
//! against [`ReservationStore`], which models the hosted document
//! store's client API — one-shot queries, atomic appends and a
//! push-based snapshot subscription. Production injects the SurrealDB
//! implementation; tests inject [`crate::db::MemoryReservationStore`].
//!
//! Snapshot semantics: every mutation re-reads the **full** record set
//! and broadcasts it (no deltas). A new subscriber receives the current
//! snapshot immediately, then one snapshot per change, in emit order.

use async_trait::async_trait;
use shared::{Reservation, ReservationDraft, ReservationStatus, SortOrder};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;

use super::repository::{RepoResult, ReservationRepository};

/// Full record set as delivered to subscribers
pub type Snapshot = Arc<Vec<Reservation>>;

/// A live snapshot subscription
///
/// `initial` is the record set at subscribe time; `receiver` yields one
/// snapshot per subsequent change. Dropping the receiver unsubscribes.
pub struct SnapshotSubscription {
    pub initial: Snapshot,
    pub receiver: broadcast::Receiver<Snapshot>,
}

/// The injected store interface
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Subscribe to the reservation collection. Delivers the current
    /// snapshot immediately and pushes a fresh one on every change.
    async fn subscribe(&self) -> RepoResult<SnapshotSubscription>;

    /// One-shot fetch (admin listing), no subscription
    async fn query_once(&self, order: SortOrder) -> RepoResult<Vec<Reservation>>;

    /// Single atomic insert; the store assigns id and creation timestamp
    async fn append(&self, draft: ReservationDraft) -> RepoResult<Reservation>;

    /// Status mutation (admin confirm / cancel)
    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation>;
}

/// SurrealDB-backed store
///
/// Mutations go through the repository, then the full set is re-read
/// and broadcast. Send failures (no live subscribers) are ignored; a
/// failed re-read is logged and the broadcast skipped, leaving
/// subscribers on their last snapshot rather than pushing a partial
/// view.
pub struct SurrealReservationStore {
    repo: ReservationRepository,
    snapshots: broadcast::Sender<Snapshot>,
}

impl SurrealReservationStore {
    pub fn new(db: Surreal<Db>, channel_capacity: usize) -> Self {
        let (snapshots, _) = broadcast::channel(channel_capacity.max(1));
        Self {
            repo: ReservationRepository::new(db),
            snapshots,
        }
    }

    async fn broadcast_snapshot(&self) {
        match self.repo.find_all(SortOrder::Asc).await {
            Ok(all) => {
                let _ = self.snapshots.send(Arc::new(all));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to re-read snapshot after mutation");
            }
        }
    }
}

#[async_trait]
impl ReservationStore for SurrealReservationStore {
    async fn subscribe(&self) -> RepoResult<SnapshotSubscription> {
        // Take the receiver before the initial read so a mutation
        // landing in between is not lost to the new subscriber.
        let receiver = self.snapshots.subscribe();
        let initial = Arc::new(self.repo.find_all(SortOrder::Asc).await?);
        Ok(SnapshotSubscription { initial, receiver })
    }

    async fn query_once(&self, order: SortOrder) -> RepoResult<Vec<Reservation>> {
        self.repo.find_all(order).await
    }

    async fn append(&self, draft: ReservationDraft) -> RepoResult<Reservation> {
        let created = self.repo.create(draft).await?;
        self.broadcast_snapshot().await;
        Ok(created)
    }

    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        let updated = self.repo.update_status(id, status).await?;
        self.broadcast_snapshot().await;
        Ok(updated)
    }
}
