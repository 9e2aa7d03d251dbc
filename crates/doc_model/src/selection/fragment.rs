//! Renderable decomposition of selections

use crate::Path;
use serde::{Deserialize, Serialize};

/// A collapsed selection: a caret inside a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub path: Path,
    pub offset: usize,
}

/// A non-collapsed span inside a single property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub path: Path,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// A node covered entirely by a container selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFragment {
    pub node_id: String,
}

/// One renderable unit of a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SelectionFragment {
    Cursor(Cursor),
    Fragment(Fragment),
    Node(NodeFragment),
}

impl SelectionFragment {
    pub fn cursor(path: Path, offset: usize) -> Self {
        Self::Cursor(Cursor { path, offset })
    }

    pub fn fragment(path: Path, start_offset: usize, end_offset: usize) -> Self {
        Self::Fragment(Fragment {
            path,
            start_offset,
            end_offset,
        })
    }

    pub fn node(node_id: impl Into<String>) -> Self {
        Self::Node(NodeFragment {
            node_id: node_id.into(),
        })
    }

    pub fn is_cursor(&self) -> bool {
        matches!(self, Self::Cursor(_))
    }

    pub fn as_cursor(&self) -> Option<&Cursor> {
        match self {
            Self::Cursor(cursor) => Some(cursor),
            _ => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&Fragment> {
        match self {
            Self::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }
}
