//! Booking Module
//!
//! The slot-accounting core: a pure tally over reservation snapshots,
//! the subscription-driven availability cache, and the submission
//! guard that admits new reservations against it.

pub mod availability;
pub mod guard;
pub mod tally;

pub use availability::AvailabilityService;
pub use guard::{ReservationService, SubmissionError, admit};
pub use tally::{SlotTally, tally};
