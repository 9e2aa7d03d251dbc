//! Ranges - an ordered pair of coordinates with direction metadata

use crate::{Coordinate, DocModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A span between two coordinates.
///
/// `start` is always the structurally earlier coordinate. The direction the
/// user made the selection in is carried by `reverse`, never by swapping the
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start: Coordinate,
    pub end: Coordinate,
    /// True if the anchor is `end` rather than `start`
    #[serde(default)]
    pub reverse: bool,
    /// Set when the range lives inside a multi-node container
    #[serde(default)]
    pub container_id: Option<String>,
    /// The editable surface owning the range
    #[serde(default)]
    pub surface_id: Option<String>,
}

impl Range {
    /// Create a forward range. Fails if both coordinates share a path and
    /// `start` lies after `end`.
    pub fn new(start: Coordinate, end: Coordinate) -> Result<Self> {
        if start.path == end.path && start.offset > end.offset {
            return Err(DocModelError::InvalidSelection(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self {
            start,
            end,
            reverse: false,
            container_id: None,
            surface_id: None,
        })
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    pub fn with_surface_id(mut self, surface_id: impl Into<String>) -> Self {
        self.surface_id = Some(surface_id.into());
        self
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Both boundaries lie in the same property
    pub fn is_property_range(&self) -> bool {
        self.start.path == self.end.path
    }

    pub fn is_container_range(&self) -> bool {
        self.container_id.is_some()
    }

    /// Where the user started the selection
    pub fn anchor(&self) -> &Coordinate {
        if self.reverse {
            &self.end
        } else {
            &self.start
        }
    }

    /// Where the caret is
    pub fn focus(&self) -> &Coordinate {
        if self.reverse {
            &self.start
        } else {
            &self.end
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.start, self.end)?;
        if self.reverse {
            write!(f, "[reverse]")?;
        }
        if let Some(container_id) = &self.container_id {
            write!(f, "[{}]", container_id)?;
        }
        Ok(())
    }
}
