//! Shared types for the VeryGood booking backend
//!
//! Domain models, API request payloads and the unified response
//! envelope used by both the server and its clients.

pub mod models;
pub mod request;
pub mod response;

pub use models::{
    Reservation, ReservationDraft, ReservationStatus, SortOrder, Supporter, SupporterDraft,
};
pub use request::{SubmitReservationRequest, SupporterApplyRequest, UpdateStatusRequest};
pub use response::{ApiResponse, SlotAvailability};
