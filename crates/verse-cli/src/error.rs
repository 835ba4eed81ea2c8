//! CLI errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid verse row on line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    #[error(transparent)]
    Core(#[from] verse_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
