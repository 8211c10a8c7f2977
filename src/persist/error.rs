//! Persistence error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur reading or writing the history file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The file could not be read or written
    #[error("failed to access history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row does not match the expected column set
    #[error("history file {path} has an invalid header: {found:?}")]
    InvalidHeader { path: PathBuf, found: String },

    /// A data row could not be parsed back into a calculation
    #[error("history file {path}, line {line}: {reason}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}
