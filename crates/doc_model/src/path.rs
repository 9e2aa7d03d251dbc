//! Property paths

use crate::{DocModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a property inside the document tree.
///
/// The first segment is the node id; for text properties the second segment
/// names the property (`["p1", "content"]`). A path is never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Path(Vec<String>);

impl Path {
    /// Create a path from its segments
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(DocModelError::InvalidSelection(
                "path must have at least one segment".to_string(),
            ));
        }
        Ok(Self(segments))
    }

    /// Path addressing `property` of `node_id`
    pub fn property(node_id: impl Into<String>, property: impl Into<String>) -> Self {
        Self(vec![node_id.into(), property.into()])
    }

    /// The node this path starts at
    pub fn node_id(&self) -> &str {
        &self.0[0]
    }

    /// The property name, if the path goes below the node
    pub fn property_name(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// False for every path built by `new`, `property` or deserialization
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for Path {
    type Error = DocModelError;

    fn try_from(segments: Vec<String>) -> Result<Self> {
        Self::new(segments)
    }
}

impl From<Path> for Vec<String> {
    fn from(path: Path) -> Self {
        path.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
