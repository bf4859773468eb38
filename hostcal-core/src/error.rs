//! Error types for hostcal.

use thiserror::Error;

/// Errors that can occur in hostcal operations.
///
/// The extractor never returns these; it degrades to an empty result and
/// reports through [`crate::extract::Diagnostic`] instead.
#[derive(Error, Debug)]
pub enum HostcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not fetch calendar feed: {0}")]
    Transport(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Invalid booking: {0}")]
    InvalidBooking(String),

    #[error("No booking at index {0}")]
    BookingNotFound(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for hostcal operations.
pub type HostcalResult<T> = Result<T, HostcalError>;
