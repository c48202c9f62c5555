//! Slot Tally
//!
//! Pure fold from a reservation snapshot to per-slot active counts.
//! "Active" excludes cancelled records. Each record with a non-empty
//! slot id contributes exactly once; accumulation is commutative, so
//! snapshot order is irrelevant.

use shared::Reservation;
use std::collections::HashMap;

/// Mapping from slot id to count of active reservations
///
/// Absent slots read as 0. A tally is always the product of exactly one
/// snapshot — it is replaced wholesale, never merged into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotTally {
    counts: HashMap<String, u32>,
}

impl SlotTally {
    /// Active reservation count for a slot (0 if absent)
    pub fn count(&self, slot_id: &str) -> u32 {
        self.counts.get(slot_id).copied().unwrap_or(0)
    }

    /// Remaining seats given an effective capacity, saturating at 0
    pub fn remaining(&self, slot_id: &str, capacity: u32) -> u32 {
        capacity.saturating_sub(self.count(slot_id))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct slots with at least one active reservation
    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

/// Fold a full snapshot into a fresh tally
///
/// A pure function of its input: identical snapshots produce identical
/// tallies, with no accumulation across calls.
pub fn tally(snapshot: &[Reservation]) -> SlotTally {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for record in snapshot {
        if record.status.is_active() && !record.slot_id.is_empty() {
            *counts.entry(record.slot_id.clone()).or_insert(0) += 1;
        }
    }
    SlotTally { counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::ReservationStatus;

    fn make_reservation(slot_id: &str, status: ReservationStatus) -> Reservation {
        Reservation {
            id: Some(format!("kids_class_reservations:{}", slot_id)),
            guardian_name: "Guardian".into(),
            phone: "010-0000-0000".into(),
            child_name: "Child".into(),
            child_age: 8,
            class_id: "chewy-cookie".into(),
            slot_id: slot_id.into(),
            note: String::new(),
            depositor_name: "Guardian".into(),
            agreed: true,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_snapshot_yields_empty_tally() {
        let t = tally(&[]);
        assert!(t.is_empty());
        assert_eq!(t.count("0228-1100"), 0);
    }

    #[test]
    fn counts_active_records_per_slot() {
        let snapshot = vec![
            make_reservation("0228-1100", ReservationStatus::Pending),
            make_reservation("0228-1100", ReservationStatus::Confirmed),
            make_reservation("0301-1100", ReservationStatus::Pending),
        ];
        let t = tally(&snapshot);
        assert_eq!(t.count("0228-1100"), 2);
        assert_eq!(t.count("0301-1100"), 1);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn cancelled_records_never_contribute() {
        let snapshot = vec![
            make_reservation("0228-1100", ReservationStatus::Pending),
            make_reservation("0228-1100", ReservationStatus::Cancelled),
            make_reservation("0301-1100", ReservationStatus::Cancelled),
        ];
        let t = tally(&snapshot);
        assert_eq!(t.count("0228-1100"), 1);
        // A slot with only cancelled records reads as 0
        assert_eq!(t.count("0301-1100"), 0);
    }

    #[test]
    fn records_without_a_slot_are_skipped() {
        let mut r = make_reservation("", ReservationStatus::Pending);
        r.slot_id = String::new();
        let t = tally(&[r]);
        assert!(t.is_empty());
    }

    #[test]
    fn fold_order_is_irrelevant() {
        let mut snapshot = vec![
            make_reservation("0228-1100", ReservationStatus::Pending),
            make_reservation("0301-1100", ReservationStatus::Confirmed),
            make_reservation("0228-1100", ReservationStatus::Pending),
            make_reservation("0302-1100", ReservationStatus::Cancelled),
        ];
        let forward = tally(&snapshot);
        snapshot.reverse();
        let backward = tally(&snapshot);
        assert_eq!(forward, backward);
    }

    #[test]
    fn pure_function_of_snapshot() {
        // Two calls over the same snapshot: identical result, no hidden
        // accumulation across calls.
        let snapshot = vec![
            make_reservation("0228-1100", ReservationStatus::Pending),
            make_reservation("0228-1100", ReservationStatus::Pending),
        ];
        let first = tally(&snapshot);
        let second = tally(&snapshot);
        assert_eq!(first, second);
        assert_eq!(second.count("0228-1100"), 2);
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let snapshot = vec![
            make_reservation("0228-1100", ReservationStatus::Pending),
            make_reservation("0228-1100", ReservationStatus::Pending),
            make_reservation("0228-1100", ReservationStatus::Pending),
        ];
        let t = tally(&snapshot);
        // Overbooked relative to an override capacity of 2
        assert_eq!(t.remaining("0228-1100", 2), 0);
        assert_eq!(t.remaining("0228-1100", 6), 3);
        assert_eq!(t.remaining("0301-1100", 6), 6);
    }
}
