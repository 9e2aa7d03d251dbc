//! Error types for the collaboration crate.

use doc_model::DocModelError;
use thiserror::Error;

/// Result type alias for collaboration operations.
pub type CollabResult<T> = Result<T, CollabError>;

/// Errors that can occur during collaboration operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollabError {
    /// The document model rejected an operation.
    #[error("Document model error: {0}")]
    DocModel(#[from] DocModelError),

    /// Reading or writing a settings file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for CollabError {
    fn from(err: std::io::Error) -> Self {
        CollabError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CollabError {
    fn from(err: serde_json::Error) -> Self {
        CollabError::SerializationError(err.to_string())
    }
}
