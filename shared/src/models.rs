//! Domain models
//!
//! A reservation is created by the public form with status `pending`,
//! moved to `confirmed` or `cancelled` by the admin dashboard, and is
//! never hard-deleted. Cancelled reservations stay in the collection so
//! slot counting can exclude them explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reservation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Valid transitions: `pending -> confirmed` and `pending -> cancelled`.
    /// Terminal states never change again.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Confirmed)
                | (ReservationStatus::Pending, ReservationStatus::Cancelled)
        )
    }

    pub fn is_active(self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Parse error for [`ReservationStatus`]
#[derive(Debug, Error)]
#[error("unknown reservation status: {0}")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for ReservationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Kids class reservation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned id, absent before the first append
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub guardian_name: String,
    pub phone: String,
    pub child_name: String,
    pub child_age: u8,
    /// Selected class identifier
    pub class_id: String,
    /// Selected slot identifier (date + time-range label)
    pub slot_id: String,
    /// Allergy note / free-text message
    #[serde(default)]
    pub note: String,
    pub depositor_name: String,
    pub agreed: bool,
    pub status: ReservationStatus,
    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for a new reservation, before the store assigns id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub guardian_name: String,
    pub phone: String,
    pub child_name: String,
    pub child_age: u8,
    pub class_id: String,
    pub slot_id: String,
    #[serde(default)]
    pub note: String,
    pub depositor_name: String,
    pub agreed: bool,
}

impl ReservationDraft {
    /// Materialize the draft as a pending reservation with the given
    /// server-side timestamp. The id stays unset until the store appends.
    pub fn into_pending(self, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id: None,
            guardian_name: self.guardian_name,
            phone: self.phone,
            child_name: self.child_name,
            child_age: self.child_age,
            class_id: self.class_id,
            slot_id: self.slot_id,
            note: self.note,
            depositor_name: self.depositor_name,
            agreed: self.agreed,
            status: ReservationStatus::Pending,
            created_at,
        }
    }
}

/// Supporters giveaway application record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supporter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub phone: String,
    /// Blog / SNS address for the review post
    #[serde(default)]
    pub blog_id: String,
    pub address: String,
    /// Selected product set ("A" | "B")
    pub product: String,
    pub agreed: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for a new supporter application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupporterDraft {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub blog_id: String,
    pub address: String,
    pub product: String,
    pub agreed: bool,
}

/// Ordering for one-shot listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first (admin dashboard default)
    #[default]
    Desc,
    Asc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_transitions_to_confirmed_and_cancelled() {
        assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Confirmed));
        assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Cancelled));
    }

    #[test]
    fn terminal_states_never_transition() {
        assert!(!ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Cancelled));
        assert!(!ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Pending));
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Confirmed));
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Pending));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        let parsed: ReservationStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Pending);
    }

    #[test]
    fn draft_into_pending_keeps_fields() {
        let draft = ReservationDraft {
            guardian_name: "Hong Gildong".into(),
            phone: "010-0000-0000".into(),
            child_name: "Kim Choco".into(),
            child_age: 8,
            class_id: "chewy-cookie".into(),
            slot_id: "feb-28-sat-1100".into(),
            note: "nut allergy".into(),
            depositor_name: "Hong Gildong".into(),
            agreed: true,
        };
        let now = Utc::now();
        let r = draft.into_pending(now);
        assert_eq!(r.status, ReservationStatus::Pending);
        assert!(r.id.is_none());
        assert_eq!(r.created_at, now);
        assert_eq!(r.slot_id, "feb-28-sat-1100");
    }
}
