//! Abstract syntax tree for lisvg diagrams.
//!
//! A [`Diagram`] is the root value produced by the parser. It is a plain
//! data model: it performs no validation beyond what the grammar enforces,
//! so node IDs may repeat or be empty and edges may reference undeclared
//! nodes. Semantic checks belong to the validator.
//!
//! # Ordering
//!
//! [`Diagram::nodes`] and [`Diagram::edges`] keep declaration order. Layout
//! relies on it for tie-breaking, so it must never be derived from map
//! iteration.

use indexmap::IndexMap;

use crate::direction::Direction;

/// Default canvas width used when no `size` directive is present.
pub const DEFAULT_WIDTH: i64 = 800;

/// Default canvas height used when no `size` directive is present.
pub const DEFAULT_HEIGHT: i64 = 400;

/// Key/value attributes attached to nodes, edges and style tables.
///
/// Later insertions of an existing key overwrite its value.
pub type Attributes = IndexMap<String, String>;

/// The root of a parsed diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    /// Declared canvas width. Not range-checked.
    pub width: i64,
    /// Declared canvas height. Not range-checked.
    pub height: i64,
    /// Per-diagram layout direction override from a `direction` directive.
    pub direction: Option<Direction>,
    /// Default presentation attributes for nodes.
    pub node_style: Attributes,
    /// Default presentation attributes for edges.
    pub edge_style: Attributes,
    /// Nodes in declaration order.
    pub nodes: Vec<Node>,
    /// Edges in declaration order.
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Creates an empty diagram with the default 800×400 canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first declared node with the given ID.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns `true` if the diagram declares no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            direction: None,
            node_style: Attributes::new(),
            edge_style: Attributes::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

/// A declared diagram node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    /// Display label; defaults to the ID.
    pub label: String,
    /// Keyword attributes other than `label`.
    pub attributes: Attributes,
}

impl Node {
    /// Creates a node whose label is its ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            attributes: Attributes::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets an attribute, replacing any earlier value for `key`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// A directed edge between two node IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Display label; empty when absent.
    pub label: String,
    /// Keyword attributes other than `label`.
    pub attributes: Attributes,
}

impl Edge {
    /// Creates an unlabeled edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: String::new(),
            attributes: Attributes::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets an attribute, replacing any earlier value for `key`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
