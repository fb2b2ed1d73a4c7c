//! Error types for slotbook.

use thiserror::Error;

/// Errors that can occur while driving the booking flow.
#[derive(Error, Debug)]
pub enum SlotbookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("No time zone selected")]
    MissingTimeZone,

    #[error("Could not parse time slot '{0}'")]
    InvalidSlot(String),

    #[error("Time slot '{0}' is not offered")]
    SlotNotOffered(String),

    #[error("Date {0} is before today")]
    DateInPast(chrono::NaiveDate),

    #[error("{0} does not exist in {1}")]
    NonexistentLocalTime(chrono::NaiveDateTime, String),

    #[error("A booking request is already in flight")]
    SubmissionInFlight,

    #[error("Wizard is not ready to submit: {0}")]
    NotReady(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Booking service responded with {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

/// Result type alias for slotbook operations.
pub type SlotbookResult<T> = Result<T, SlotbookError>;
