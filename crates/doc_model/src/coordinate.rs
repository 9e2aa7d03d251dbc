//! Coordinates - a single addressable position in the document

use crate::Path;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A position inside a property: a path plus a character offset.
///
/// The offset is counted in grapheme clusters and is not clamped against the
/// property's content; out-of-range offsets are reported where the content
/// is read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub path: Path,
    pub offset: usize,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(path: Path, offset: usize) -> Self {
        Self { path, offset }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True if the coordinate addresses a whole node rather than a property
    pub fn is_node_coordinate(&self) -> bool {
        self.path.len() == 1
    }

    /// True if the coordinate points into a property
    pub fn is_property_coordinate(&self) -> bool {
        self.path.len() > 1
    }

    /// A copy of this coordinate at another offset
    pub fn with_offset(&self, offset: usize) -> Self {
        Self {
            path: self.path.clone(),
            offset,
        }
    }
}

/// Coordinates only compare when they share a path; positions in different
/// properties have no order without a container.
impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.path == other.path {
            Some(self.offset.cmp(&other.offset))
        } else {
            None
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.offset)
    }
}
