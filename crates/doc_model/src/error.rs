//! Error types for document model operations

use crate::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocModelError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(Path),

    #[error("Invalid position: {path}, offset {offset}")]
    InvalidPosition { path: Path, offset: usize },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Incompatible paths: {left} and {right}")]
    IncompatiblePath { left: Path, right: Path },

    #[error("Incompatible containers: {left} and {right}")]
    IncompatibleContainer { left: String, right: String },

    /// Truncating would leave two disjoint pieces.
    #[error("Can not truncate {selection} with contained selection {other}")]
    UnsupportedTruncation { selection: String, other: String },

    /// A branch that valid selections can not reach was taken.
    #[error("Selection invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Selection is not attached to a live document")]
    Detached,

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
