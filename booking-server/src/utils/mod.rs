//! Utilities Module

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ok, ok_with_message};
