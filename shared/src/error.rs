//! Error types for the appointment Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the appointment Lambda functions.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Appointment store error
    #[error("Store error: {0}")]
    Store(String),

    /// Queue publisher error
    #[error("Queue error: {0}")]
    Queue(String),

    /// Topic publisher error
    #[error("Topic error: {0}")]
    Topic(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Validation("missing field".into()).status_code(), 400);
        assert_eq!(Error::Store("put failed".into()).status_code(), 500);
        assert_eq!(Error::Queue("send failed".into()).status_code(), 500);
        assert_eq!(Error::Internal("oops".into()).status_code(), 500);
    }
}
