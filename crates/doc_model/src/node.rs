//! Document nodes and ordered containers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed node with named text properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    node_type: String,
    properties: BTreeMap<String, String>,
}

impl Node {
    /// Create a node without properties
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut String> {
        self.properties.get_mut(name)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}

/// An ordered sequence of node ids (e.g. a document body)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    id: String,
    nodes: Vec<String>,
}

impl Container {
    /// Create an empty container
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
        }
    }

    /// Create a container holding `nodes` in order
    pub fn with_nodes<I, S>(id: impl Into<String>, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            nodes: nodes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Index of a node within the container
    pub fn position(&self, node_id: &str) -> Option<usize> {
        self.nodes.iter().position(|id| id == node_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node_id: impl Into<String>) {
        self.nodes.push(node_id.into());
    }

    /// Insert a node id at `index`, appending when out of bounds
    pub fn insert(&mut self, index: usize, node_id: impl Into<String>) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node_id.into());
    }

    /// Remove a node id, returning whether it was present
    pub fn remove(&mut self, node_id: &str) -> bool {
        if let Some(pos) = self.position(node_id) {
            self.nodes.remove(pos);
            true
        } else {
            false
        }
    }
}
