//! Persistence row types
//!
//! SurrealDB-facing mirror structs of the shared domain models. The
//! only difference is the id column: rows carry a native `RecordId`,
//! the domain types carry its "table:id" string form.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Reservation, ReservationStatus, Supporter};
use surrealdb::RecordId;

/// Reservation row (kids_class_reservations)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRow {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
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
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id.map(|id| id.to_string()),
            guardian_name: row.guardian_name,
            phone: row.phone,
            child_name: row.child_name,
            child_age: row.child_age,
            class_id: row.class_id,
            slot_id: row.slot_id,
            note: row.note,
            depositor_name: row.depositor_name,
            agreed: row.agreed,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

impl ReservationRow {
    /// Row for a fresh insert; the store assigns the id
    pub fn from_domain(r: Reservation) -> Self {
        Self {
            id: None,
            guardian_name: r.guardian_name,
            phone: r.phone,
            child_name: r.child_name,
            child_age: r.child_age,
            class_id: r.class_id,
            slot_id: r.slot_id,
            note: r.note,
            depositor_name: r.depositor_name,
            agreed: r.agreed,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

/// Supporter row (supporters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupporterRow {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub blog_id: String,
    pub address: String,
    pub product: String,
    pub agreed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SupporterRow> for Supporter {
    fn from(row: SupporterRow) -> Self {
        Supporter {
            id: row.id.map(|id| id.to_string()),
            name: row.name,
            phone: row.phone,
            blog_id: row.blog_id,
            address: row.address,
            product: row.product,
            agreed: row.agreed,
            created_at: row.created_at,
        }
    }
}

impl SupporterRow {
    pub fn from_domain(s: Supporter) -> Self {
        Self {
            id: None,
            name: s.name,
            phone: s.phone,
            blog_id: s.blog_id,
            address: s.address,
            product: s.product,
            agreed: s.agreed,
            created_at: s.created_at,
        }
    }
}
