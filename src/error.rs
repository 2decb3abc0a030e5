//! Error types for dashboard operations
//!
//! Only two operations can fail from user input: ingesting without an account
//! selected, and predicting with an empty keyword list. Everything else
//! degrades to defaults; storage failures are the one non-user error source.

use std::fmt;

use crate::storage::StorageError;

/// Result type alias for dashboard operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the dashboard operations
#[derive(Debug)]
pub enum EngineError {
    /// Ingest was called without an account selected
    NoAccountSelected,

    /// Predict was called with no usable keywords
    EmptyKeywords,

    /// The write-through persistence step failed
    Storage(StorageError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoAccountSelected => {
                write!(f, "connect an account first")
            }
            EngineError::EmptyKeywords => {
                write!(f, "enter some keywords (comma separated)")
            }
            EngineError::Storage(err) => write!(f, "storage error: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        EngineError::Storage(err)
    }
}
