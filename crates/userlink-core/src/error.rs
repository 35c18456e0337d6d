//! Error types for Userlink

use thiserror::Error;

/// Result type alias using Userlink's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Userlink error types
///
/// Not-found is never an error: lookups signal absence with `Ok(None)` and
/// deletes with `Ok(false)`, so callers can tell a missing row apart from a
/// storage fault.
#[derive(Error, Debug)]
pub enum Error {
    // Database errors (E400-E499)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "E400",
            Self::InvalidInput(_) => "E800",
        }
    }
}
