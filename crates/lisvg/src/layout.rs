//! Layout engine for positioning diagram nodes and routing edges.
//!
//! # Pipeline Position
//!
//! ```text
//! Diagram (AST)
//!     ↓ layout (this module)
//! Layout
//!     ↓ export
//! SVG
//! ```
//!
//! The engine is level based. Nodes are grouped into levels by their
//! distance from the roots of the dependency graph, each level is placed
//! one step further along the direction's primary axis, and the nodes of a
//! level are centered on the cross axis. Edges become straight two-point
//! paths between node boundaries. Finally everything is shifted so the
//! padded bounding box starts at the origin.
//!
//! # Submodules
//!
//! - `graph` - Dependency graph and level assignment
//! - `engine` - [`Engine`], positioning, routing and normalization

mod engine;
mod graph;

pub use engine::Engine;

use indexmap::IndexMap;

use lisvg_core::geometry::{Bounds, Point, Size};

/// A placed node.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    /// Center of the node.
    pub position: Point,
    pub size: Size,
    pub label: String,
    /// Raw `shape` attribute, `rect` when absent.
    pub shape: String,
    pub style: String,
    pub color: String,
}

impl LayoutNode {
    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    pub fn width(&self) -> f64 {
        self.size.width()
    }

    pub fn height(&self) -> f64 {
        self.size.height()
    }

    /// The node's bounding box.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.size)
    }
}

/// A routed edge between two placed nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub from: String,
    pub to: String,
    /// Path points, source boundary first.
    pub points: Vec<Point>,
    pub label: String,
    /// Midpoint of the two node centers.
    pub label_position: Point,
}

/// The positioned output of the layout engine.
///
/// Coordinates are y-up and, for non-empty layouts, non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// Placed nodes keyed by ID, in placement order.
    pub nodes: IndexMap<String, LayoutNode>,
    /// Routed edges in declaration order.
    pub edges: Vec<LayoutEdge>,
}

impl Layout {
    /// Creates a layout with no content.
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the canvas size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the placed node with the given ID.
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }
}
