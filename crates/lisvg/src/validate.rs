//! Semantic checks over a parsed [`Diagram`].
//!
//! The parser accepts any syntactically valid diagram, including ones with
//! repeated or empty node IDs and edges to nodes that were never declared.
//! [`validate`] runs three independent groups of checks and reports every
//! problem it finds rather than stopping at the first:
//!
//! 1. node ID uniqueness
//! 2. edge endpoint references
//! 3. enumerated attribute values (`shape` on nodes, `style` on edges)
//!
//! Errors keep the offending node ID or edge index as data; messages are
//! only produced when an error is displayed.

use std::{collections::HashSet, fmt};

use lisvg_core::ast::Diagram;

/// Values accepted for a node's `shape` attribute.
pub const VALID_SHAPES: &[&str] = &[
    "rect",
    "rectangle",
    "box",
    "ellipse",
    "circle",
    "oval",
    "diamond",
    "rhombus",
    "triangle",
    "trapezium",
    "polygon",
    "hexagon",
    "octagon",
];

/// Values accepted for an edge's `style` attribute.
pub const VALID_EDGE_STYLES: &[&str] = &["solid", "dashed", "dotted", "bold", "invis", "invisible"];

/// Which end of an edge an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::From => write!(f, "from"),
            Endpoint::To => write!(f, "to"),
        }
    }
}

/// The class of a validation failure, with any value it is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    EmptyNodeId,
    DuplicateNodeId,
    EmptyEndpoint(Endpoint),
    /// The endpoint names a node that is not declared.
    UnknownEndpoint(Endpoint, String),
    InvalidShape(String),
    InvalidEdgeStyle(String),
}

/// A single validation failure.
///
/// Node-scoped errors carry `node_id`, edge-scoped errors carry
/// `edge_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    node_id: Option<String>,
    edge_index: Option<usize>,
}

impl ValidationError {
    fn for_node(kind: ValidationErrorKind, node_id: &str) -> Self {
        Self {
            kind,
            node_id: Some(node_id.to_string()),
            edge_index: None,
        }
    }

    fn for_edge(kind: ValidationErrorKind, edge_index: usize) -> Self {
        Self {
            kind,
            node_id: None,
            edge_index: Some(edge_index),
        }
    }

    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// ID of the offending node, for node-scoped errors.
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Index of the offending edge in declaration order, for edge-scoped errors.
    pub fn edge_index(&self) -> Option<usize> {
        self.edge_index
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node_id.as_deref().unwrap_or_default();
        let edge = self.edge_index.unwrap_or_default();
        match &self.kind {
            ValidationErrorKind::EmptyNodeId => write!(f, "node ID cannot be empty"),
            ValidationErrorKind::DuplicateNodeId => write!(f, "duplicate node ID: {node}"),
            ValidationErrorKind::EmptyEndpoint(endpoint) => {
                write!(f, "edge {edge}: '{endpoint}' node ID cannot be empty")
            }
            ValidationErrorKind::UnknownEndpoint(endpoint, id) => {
                write!(f, "edge {edge}: '{endpoint}' node '{id}' does not exist")
            }
            ValidationErrorKind::InvalidShape(shape) => {
                write!(f, "node '{node}': invalid shape '{shape}'")
            }
            ValidationErrorKind::InvalidEdgeStyle(style) => {
                write!(f, "edge {edge}: invalid style '{style}'")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every error found in one diagram, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} errors: ", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates `diagram`, collecting every error.
///
/// # Errors
///
/// Returns [`ValidationErrors`] holding at least one error if any check fails.
///
/// # Example
///
/// ```
/// # use lisvg::validate::validate;
/// # use lisvg_core::ast::{Diagram, Edge, Node};
/// let mut diagram = Diagram::new();
/// diagram.nodes.push(Node::new("a"));
/// diagram.edges.push(Edge::new("a", "b"));
///
/// let err = validate(&diagram).unwrap_err();
/// assert_eq!(err.errors()[0].edge_index(), Some(0));
/// assert_eq!(err.to_string(), "validation failed with 1 errors: edge 0: 'to' node 'b' does not exist");
/// ```
pub fn validate(diagram: &Diagram) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    check_node_ids(diagram, &mut errors);
    check_edge_references(diagram, &mut errors);
    check_attributes(diagram, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn check_node_ids(diagram: &Diagram, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for node in &diagram.nodes {
        if node.id.is_empty() {
            errors.push(ValidationError::for_node(ValidationErrorKind::EmptyNodeId, ""));
            continue;
        }
        if !seen.insert(node.id.as_str()) {
            duplicates.push(node.id.as_str());
        }
    }

    // Duplicates are reported after every empty ID, once per extra occurrence.
    errors.extend(
        duplicates
            .into_iter()
            .map(|id| ValidationError::for_node(ValidationErrorKind::DuplicateNodeId, id)),
    );
}

fn check_edge_references(diagram: &Diagram, errors: &mut Vec<ValidationError>) {
    let declared: HashSet<&str> = diagram.nodes.iter().map(|node| node.id.as_str()).collect();

    for (index, edge) in diagram.edges.iter().enumerate() {
        for (endpoint, id) in [(Endpoint::From, &edge.from), (Endpoint::To, &edge.to)] {
            let kind = if id.is_empty() {
                ValidationErrorKind::EmptyEndpoint(endpoint)
            } else if !declared.contains(id.as_str()) {
                ValidationErrorKind::UnknownEndpoint(endpoint, id.clone())
            } else {
                continue;
            };
            errors.push(ValidationError::for_edge(kind, index));
        }
    }
}

fn check_attributes(diagram: &Diagram, errors: &mut Vec<ValidationError>) {
    for node in &diagram.nodes {
        if let Some(shape) = node
            .attribute("shape")
            .filter(|shape| !VALID_SHAPES.contains(shape))
        {
            errors.push(ValidationError::for_node(
                ValidationErrorKind::InvalidShape(shape.to_string()),
                &node.id,
            ));
        }
    }

    for (index, edge) in diagram.edges.iter().enumerate() {
        if let Some(style) = edge
            .attribute("style")
            .filter(|style| !VALID_EDGE_STYLES.contains(style))
        {
            errors.push(ValidationError::for_edge(
                ValidationErrorKind::InvalidEdgeStyle(style.to_string()),
                index,
            ));
        }
    }
}
