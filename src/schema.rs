//! Attribute schema registry
//!
//! Tracks every attribute name seen on nodes and edges so the serializer can
//! emit one GraphML `<key>` declaration per name.

use serde_json::Value;
use std::collections::BTreeMap;

/// GraphML attribute types produced by the converter
///
/// Every attribute is declared as a string for tool compatibility; numbers,
/// booleans and nested objects are stringified on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttrType {
    /// `attr.type="string"`
    #[default]
    String,
}

impl AttrType {
    /// Declared type for a JSON value
    #[must_use]
    pub const fn of(_value: &Value) -> Self {
        Self::String
    }

    /// Value of the `attr.type` attribute
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
        }
    }
}

/// Which element a `<key>` applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDomain {
    /// `for="node"`
    Node,
    /// `for="edge"`
    Edge,
}

impl KeyDomain {
    /// Value of the `for` attribute
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
        }
    }
}

/// Registered attribute names and their declared types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    node: BTreeMap<String, AttrType>,
    edge: BTreeMap<String, AttrType>,
}

/// Edge attributes always declared, following Cytoscape's import conventions
pub const DEFAULT_EDGE_KEYS: [&str; 5] =
    ["source", "target", "entity_type", "interaction", "shared interaction"];
/// Node attributes always declared
pub const DEFAULT_NODE_KEYS: [&str; 2] = ["entity_type", "name"];

impl Default for AttributeSchema {
    fn default() -> Self {
        let mut schema = Self {
            node: BTreeMap::new(),
            edge: BTreeMap::new(),
        };
        for key in DEFAULT_NODE_KEYS {
            schema.node.insert(key.to_string(), AttrType::String);
        }
        for key in DEFAULT_EDGE_KEYS {
            schema.edge.insert(key.to_string(), AttrType::String);
        }
        schema
    }
}

impl AttributeSchema {
    /// Create a registry holding the default node and edge keys
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node attribute; later registrations overwrite the type
    pub fn register_node(&mut self, name: &str, value: &Value) {
        self.node.insert(name.to_string(), AttrType::of(value));
    }

    /// Register an edge attribute
    pub fn register_edge(&mut self, name: &str, value: &Value) {
        self.edge.insert(name.to_string(), AttrType::of(value));
    }

    /// Node attributes in name order
    pub fn node_keys(&self) -> impl Iterator<Item = (&str, AttrType)> {
        self.node.iter().map(|(k, t)| (k.as_str(), *t))
    }

    /// Edge attributes in name order
    pub fn edge_keys(&self) -> impl Iterator<Item = (&str, AttrType)> {
        self.edge.iter().map(|(k, t)| (k.as_str(), *t))
    }

    /// Whether a node attribute has been registered
    #[must_use]
    pub fn has_node_key(&self, name: &str) -> bool {
        self.node.contains_key(name)
    }

    /// Whether an edge attribute has been registered
    #[must_use]
    pub fn has_edge_key(&self, name: &str) -> bool {
        self.edge.contains_key(name)
    }
}
