//! Document operations that selections are rebased across
//!
//! Operations address text by grapheme offsets inside a property path, the
//! same coordinate space selections use.

use doc_model::{grapheme_len, Document, Path};
use serde::{Deserialize, Serialize};

use crate::error::CollabResult;

/// A single edit to the document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DocOperation {
    /// Insert text at an offset
    #[serde(rename_all = "camelCase")]
    InsertText {
        path: Path,
        offset: usize,
        text: String,
    },

    /// Delete the text in `[start_offset, end_offset)`
    #[serde(rename_all = "camelCase")]
    DeleteText {
        path: Path,
        start_offset: usize,
        end_offset: usize,
    },

    /// Replace the whole content of a property
    #[serde(rename_all = "camelCase")]
    SetText { path: Path, text: String },

    /// Remove a node from the document and all containers
    #[serde(rename_all = "camelCase")]
    DeleteNode { node_id: String },
}

impl DocOperation {
    pub fn insert_text(path: Path, offset: usize, text: impl Into<String>) -> Self {
        DocOperation::InsertText {
            path,
            offset,
            text: text.into(),
        }
    }

    pub fn delete_text(path: Path, start_offset: usize, end_offset: usize) -> Self {
        DocOperation::DeleteText {
            path,
            start_offset,
            end_offset,
        }
    }

    pub fn set_text(path: Path, text: impl Into<String>) -> Self {
        DocOperation::SetText {
            path,
            text: text.into(),
        }
    }

    pub fn delete_node(node_id: impl Into<String>) -> Self {
        DocOperation::DeleteNode {
            node_id: node_id.into(),
        }
    }

    /// The property this operation edits, if it edits text
    pub fn path(&self) -> Option<&Path> {
        match self {
            DocOperation::InsertText { path, .. }
            | DocOperation::DeleteText { path, .. }
            | DocOperation::SetText { path, .. } => Some(path),
            DocOperation::DeleteNode { .. } => None,
        }
    }

    /// Number of graphemes inserted, for text insertions
    pub fn inserted_len(&self) -> usize {
        match self {
            DocOperation::InsertText { text, .. } => grapheme_len(text),
            _ => 0,
        }
    }

    /// Apply the operation to a document
    pub fn apply(&self, doc: &mut Document) -> CollabResult<()> {
        match self {
            DocOperation::InsertText { path, offset, text } => {
                doc.insert_text(path, *offset, text)?;
            }
            DocOperation::DeleteText {
                path,
                start_offset,
                end_offset,
            } => {
                doc.delete_text(path, *start_offset, *end_offset)?;
            }
            DocOperation::SetText { path, text } => {
                doc.set_text(path, text.as_str())?;
            }
            DocOperation::DeleteNode { node_id } => {
                doc.delete_node(node_id)?;
            }
        }
        Ok(())
    }
}
