//! API request payloads

use serde::{Deserialize, Serialize};

use crate::models::ReservationStatus;

/// POST /api/reservations
///
/// Mirrors the public form: class and slot are optional because the
/// guard reports "not selected" as its own rejection reason rather than
/// failing deserialization, and the age arrives as the raw text input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReservationRequest {
    #[serde(default)]
    pub class_id: Option<String>,
    #[serde(default)]
    pub slot_id: Option<String>,
    /// Personal-data consent checkbox
    #[serde(default)]
    pub agreed: bool,
    pub guardian_name: String,
    pub phone: String,
    pub child_name: String,
    /// Raw form value, parsed by the guard
    pub child_age: String,
    #[serde(default)]
    pub note: String,
    pub depositor_name: String,
}

/// POST /api/supporters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupporterApplyRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub blog_id: String,
    pub address: String,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub agreed: bool,
}

/// POST /api/reservations/{id}/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ReservationStatus,
}
