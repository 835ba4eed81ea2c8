//! Oracle error types

use thiserror::Error;

/// Errors that can occur while asking an oracle for an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// No provider could be reached or configured
    #[error("No LLM available: {0}")]
    Unavailable(String),

    /// API request failed
    #[error("API request failed: {0}")]
    Api(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider not configured
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Network error (including timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Response parsing error
    #[error("Response parsing error: {0}")]
    Parse(String),
}

/// Result type for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;

impl From<OracleError> for verse_core::Error {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::Unavailable(msg) | OracleError::NotConfigured(msg) => {
                verse_core::Error::OracleUnavailable(msg)
            }
            other => verse_core::Error::Oracle(other.to_string()),
        }
    }
}
