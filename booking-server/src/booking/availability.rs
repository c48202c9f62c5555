//! Availability Service
//!
//! Maintains the last-known slot tally from the store's snapshot
//! stream. Each snapshot replaces the tally wholesale, synchronously
//! with its arrival — readers never observe a partial fold.
//!
//! If the stream fails, the tally is deliberately frozen at its
//! last-known-good value and the error is logged; resetting it to
//! empty would falsely re-open full slots on the form.

use parking_lot::RwLock;
use shared::{Reservation, SlotAvailability};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::tally::{SlotTally, tally};
use crate::catalog::ClassCatalog;
use crate::db::repository::RepoResult;
use crate::db::store::{ReservationStore, Snapshot};

#[derive(Clone)]
pub struct AvailabilityService {
    inner: Arc<Inner>,
}

struct Inner {
    catalog: Arc<ClassCatalog>,
    tally: RwLock<SlotTally>,
}

impl AvailabilityService {
    pub fn new(catalog: Arc<ClassCatalog>) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalog,
                tally: RwLock::new(SlotTally::default()),
            }),
        }
    }

    /// Subscribe to the store and keep the tally current
    ///
    /// Applies the initial snapshot before returning, so the tally is
    /// populated by the time the HTTP surface starts serving. The
    /// background task holds only the receiver, not the store handle.
    pub async fn start(&self, store: &Arc<dyn ReservationStore>) -> RepoResult<()> {
        let subscription = store.subscribe().await?;
        self.apply(&subscription.initial);

        let service = self.clone();
        tokio::spawn(async move {
            service.run(subscription.receiver).await;
        });
        Ok(())
    }

    /// Consume snapshots until the stream ends
    async fn run(self, mut receiver: broadcast::Receiver<Snapshot>) {
        loop {
            match receiver.recv().await {
                Ok(snapshot) => self.apply(&snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Skipped snapshots are harmless: the next received
                    // one is the full current set, not a delta.
                    tracing::warn!(skipped, "Snapshot stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::error!(
                        "Snapshot stream closed; availability frozen at last known tally"
                    );
                    break;
                }
            }
        }
    }

    /// Replace the tally with a fresh fold of the snapshot
    fn apply(&self, snapshot: &[Reservation]) {
        let next = tally(snapshot);
        *self.inner.tally.write() = next;
    }

    /// The tally as of the most recent snapshot
    ///
    /// Callers that gate a submission must capture this once and decide
    /// against the captured value; it is advisory and may be stale the
    /// moment it is read.
    pub fn current(&self) -> SlotTally {
        self.inner.tally.read().clone()
    }

    /// Remaining seats for one slot under the effective capacity
    pub fn remaining(&self, slot_id: &str) -> u32 {
        let capacity = self.inner.catalog.effective_capacity(slot_id);
        self.inner.tally.read().remaining(slot_id, capacity)
    }

    /// Per-slot availability figures for the rendering layer
    pub fn slots(&self) -> Vec<SlotAvailability> {
        let tally = self.inner.tally.read();
        self.inner
            .catalog
            .all_slots()
            .map(|(class, slot)| {
                let capacity = self.inner.catalog.effective_capacity(&slot.id);
                let reserved = tally.count(&slot.id);
                let remaining = tally.remaining(&slot.id, capacity);
                SlotAvailability {
                    class_id: class.id.clone(),
                    slot_id: slot.id.clone(),
                    label: slot.label.clone(),
                    capacity,
                    reserved,
                    remaining,
                    is_full: remaining == 0,
                }
            })
            .collect()
    }
}
