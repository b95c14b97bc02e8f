//! Common error types for the quiz service

use thiserror::Error;

/// Common result type for quiz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the scoring, repository and leaderboard layers
#[derive(Error, Debug)]
pub enum Error {
    /// Submission is missing a required field or carries an unusable value
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid input to a pure operation (e.g. too many quiz answers)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backing key-value store unreachable, timed out or misconfigured
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored leaderboard member could not be decoded
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}
