//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// The search request cannot be scanned at all (bad duration, range, roster).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A single availability window failed validation at ingestion.
    #[error("Malformed availability: {0}")]
    MalformedAvailability(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
