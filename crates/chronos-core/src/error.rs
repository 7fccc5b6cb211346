//! Error types for chronos-core operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid time: {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    /// A date or time display pattern chrono cannot format with.
    #[error("Invalid format pattern: {0}")]
    InvalidFormat(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PickerError>;
