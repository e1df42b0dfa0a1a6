//! Error types for calendar operations.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::BusinessHours;

/// Result type for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Errors reported to the caller of a calendar operation.
///
/// None of these are faults: every variant is a structured answer to a bad
/// request and leaves the store untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Unparsable date/time, non-positive duration, or start not before end.
    #[error("{0}")]
    InvalidInput(String),

    /// Meeting starts before opening or ends after closing.
    #[error(
        "Meetings can only be scheduled between {} and {}.",
        .hours.opening_label(),
        .hours.closing_label()
    )]
    OutOfHours { hours: BusinessHours },

    /// Proposed interval overlaps a stored appointment.
    #[error(
        "Time slot conflicts with existing appointment: {title} ({} - {})",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    Conflict {
        title: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl CalendarError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
