//! Error types for VerseDB
//!
//! Most failure modes in query resolution are recovered locally (an unknown
//! book falls through to intent classification, a failed oracle call falls
//! back to keyword compilation). The variants here describe them so callers
//! can log or surface them consistently.

use thiserror::Error;

/// The main error type for VerseDB operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========== Reference Errors ==========
    #[error("Unresolved book name: {0}")]
    UnresolvedBookName(String),

    #[error("Unknown book id: {0}")]
    UnknownBookId(u32),

    // ========== Expression Errors ==========
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    // ========== Oracle Errors ==========
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Oracle error: {0}")]
    Oracle(String),

    // ========== Raw SQL Errors ==========
    #[error("Unsafe raw query rejected: forbidden token {token:?}")]
    UnsafeRawQuery { token: String },

    // ========== Configuration Errors ==========
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for VerseDB operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true if resolution can continue on a fallback path
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnresolvedBookName(_)
                | Error::MalformedExpression(_)
                | Error::OracleUnavailable(_)
                | Error::Oracle(_)
        )
    }

    /// Returns true if the request must be rejected without touching the store
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::UnsafeRawQuery { .. })
    }
}
