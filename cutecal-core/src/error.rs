//! Error types for cutecal.

use thiserror::Error;

/// Errors that can occur in cutecal operations.
#[derive(Error, Debug)]
pub enum CalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Date out of range: year {year}, month {month}")]
    DateOutOfRange { year: i32, month: i32 },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CalError {
    fn from(e: serde_json::Error) -> Self {
        CalError::Serialization(e.to_string())
    }
}

/// Result type alias for cutecal operations.
pub type CalResult<T> = Result<T, CalError>;
