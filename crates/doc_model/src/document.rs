//! Document root and document-level text operations

use crate::{Container, DocModelError, Node, Path, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

/// Shared, lockable document. Selections keep only a weak reference to it.
pub type DocumentHandle = Arc<RwLock<Document>>;

/// The live document: nodes by id plus ordered containers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    nodes: HashMap<String, Node>,
    containers: HashMap<String, Container>,
    /// Version counter for tracking changes
    version: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the document so selections can attach to it
    pub fn into_handle(self) -> DocumentHandle {
        Arc::new(RwLock::new(self))
    }

    /// Get the document version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Increment version after a change
    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Resolve a node id to the live node
    pub fn get(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn get_mut(&mut self, node_id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Create an empty node with a fresh id and return the id
    pub fn create_node(&mut self, node_type: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_node(Node::new(id.clone(), node_type));
        id
    }

    /// Insert or replace a node, returning the replaced one
    pub fn insert_node(&mut self, node: Node) -> Option<Node> {
        self.increment_version();
        self.nodes.insert(node.id().to_string(), node)
    }

    /// Delete a node and remove it from every container
    pub fn delete_node(&mut self, node_id: &str) -> Result<Node> {
        let node = self
            .nodes
            .remove(node_id)
            .ok_or_else(|| DocModelError::NodeNotFound(node_id.to_string()))?;
        for container in self.containers.values_mut() {
            container.remove(node_id);
        }
        self.increment_version();
        Ok(node)
    }

    /// Add or replace a container
    pub fn add_container(&mut self, container: Container) {
        self.containers.insert(container.id().to_string(), container);
        self.increment_version();
    }

    pub fn container(&self, container_id: &str) -> Option<&Container> {
        self.containers.get(container_id)
    }

    pub fn container_mut(&mut self, container_id: &str) -> Option<&mut Container> {
        self.containers.get_mut(container_id)
    }

    /// Content of the text property addressed by `path`
    pub fn get_text(&self, path: &Path) -> Result<&str> {
        let node = self
            .get(path.node_id())
            .ok_or_else(|| DocModelError::NodeNotFound(path.node_id().to_string()))?;
        path.property_name()
            .and_then(|name| node.property(name))
            .ok_or_else(|| DocModelError::PropertyNotFound(path.clone()))
    }

    /// Length of a text property in grapheme clusters
    pub fn text_length(&self, path: &Path) -> Result<usize> {
        self.get_text(path).map(grapheme_len)
    }

    /// Replace the content of a text property, creating the property if needed
    pub fn set_text(&mut self, path: &Path, text: impl Into<String>) -> Result<()> {
        let name = path
            .property_name()
            .ok_or_else(|| DocModelError::PropertyNotFound(path.clone()))?;
        let node = self
            .nodes
            .get_mut(path.node_id())
            .ok_or_else(|| DocModelError::NodeNotFound(path.node_id().to_string()))?;
        node.set_property(name, text);
        self.increment_version();
        Ok(())
    }

    /// Insert `text` at a grapheme offset
    pub fn insert_text(&mut self, path: &Path, offset: usize, text: &str) -> Result<()> {
        let content = self.property_mut(path)?;
        let at = byte_offset(content, offset).ok_or_else(|| DocModelError::InvalidPosition {
            path: path.clone(),
            offset,
        })?;
        content.insert_str(at, text);
        self.increment_version();
        Ok(())
    }

    /// Delete the graphemes in `[start_offset, end_offset)`
    pub fn delete_text(&mut self, path: &Path, start_offset: usize, end_offset: usize) -> Result<()> {
        if start_offset > end_offset {
            return Err(DocModelError::InvalidPosition {
                path: path.clone(),
                offset: start_offset,
            });
        }
        let content = self.property_mut(path)?;
        let start = byte_offset(content, start_offset).ok_or_else(|| {
            DocModelError::InvalidPosition {
                path: path.clone(),
                offset: start_offset,
            }
        })?;
        let end = byte_offset(content, end_offset).ok_or_else(|| DocModelError::InvalidPosition {
            path: path.clone(),
            offset: end_offset,
        })?;
        content.replace_range(start..end, "");
        self.increment_version();
        Ok(())
    }

    fn property_mut(&mut self, path: &Path) -> Result<&mut String> {
        let node = self
            .nodes
            .get_mut(path.node_id())
            .ok_or_else(|| DocModelError::NodeNotFound(path.node_id().to_string()))?;
        path.property_name()
            .and_then(|name| node.property_mut(name))
            .ok_or_else(|| DocModelError::PropertyNotFound(path.clone()))
    }
}

/// Number of grapheme clusters in `text`
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte index of a grapheme offset; the offset equal to the length is valid
pub(crate) fn byte_offset(text: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return Some(0);
    }
    text.grapheme_indices(true)
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()))
        .nth(offset)
}

/// Slice `text` by grapheme offsets
pub fn slice_graphemes(text: &str, start_offset: usize, end_offset: usize) -> Option<&str> {
    if start_offset > end_offset {
        return None;
    }
    let start = byte_offset(text, start_offset)?;
    let end = byte_offset(text, end_offset)?;
    Some(&text[start..end])
}
