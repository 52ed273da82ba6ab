//! The level-based layout engine.

use std::collections::HashMap;

use log::{debug, info, trace};

use lisvg_core::{
    ast::{Diagram, Node},
    direction::{Axis, Direction},
    geometry::{Bounds, Point, Size},
};

use super::{
    Layout, LayoutEdge, LayoutNode,
    graph::{DependencyGraph, Levels},
};

/// Positions nodes and routes edges for a [`Diagram`].
///
/// All nodes get the same fixed size. The engine holds configuration only,
/// so one instance can lay out any number of diagrams.
///
/// # Example
///
/// ```
/// # use lisvg::layout::Engine;
/// # use lisvg_core::{ast::{Diagram, Edge, Node}, direction::Direction};
/// let mut diagram = Diagram::new();
/// diagram.nodes.extend([Node::new("a"), Node::new("b")]);
/// diagram.edges.push(Edge::new("a", "b"));
///
/// let layout = Engine::new()
///     .with_direction(Direction::LeftToRight)
///     .layout_diagram(&diagram);
///
/// assert!(layout.node("a").unwrap().x() < layout.node("b").unwrap().x());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    node_size: Size,
    horizontal_gap: f64,
    vertical_gap: f64,
    padding: f64,
    direction: Direction,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with 100×50 nodes, 80 unit gaps and 40 units of
    /// padding, laying out top to bottom.
    pub fn new() -> Self {
        Self {
            node_size: Size::new(100.0, 50.0),
            horizontal_gap: 80.0,
            vertical_gap: 80.0,
            padding: 40.0,
            direction: Direction::TopToBottom,
        }
    }

    /// Set the size shared by every node
    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_size = size;
        self
    }

    /// Set the gap between nodes along the x axis
    pub fn with_horizontal_gap(mut self, gap: f64) -> Self {
        self.horizontal_gap = gap;
        self
    }

    /// Set the gap between nodes along the y axis
    pub fn with_vertical_gap(mut self, gap: f64) -> Self {
        self.vertical_gap = gap;
        self
    }

    /// Set the padding around the node bounding box
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the direction used when a diagram does not name one
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn gap(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_gap,
            Axis::Vertical => self.vertical_gap,
        }
    }

    /// Distance between the centers of neighbouring slots along `axis`.
    fn step(&self, axis: Axis) -> f64 {
        axis.extent(self.node_size) + self.gap(axis)
    }

    /// Lays out `diagram`.
    ///
    /// A diagram without nodes yields an empty layout of the diagram's
    /// declared size. Otherwise every declared node is placed exactly once,
    /// edges between placed nodes are routed and the rest are dropped, and
    /// the result is translated so all coordinates are non-negative.
    pub fn layout_diagram(&self, diagram: &Diagram) -> Layout {
        if diagram.is_empty() {
            debug!(
                width = diagram.width,
                height = diagram.height;
                "Diagram has no nodes, using declared size"
            );
            return Layout::empty(diagram.width as f64, diagram.height as f64);
        }

        let direction = diagram.direction.unwrap_or(self.direction);
        info!(direction = direction.as_str(); "Calculating layout");

        let graph = DependencyGraph::from_diagram(diagram);
        let levels = graph.levels();
        debug!(levels_len = levels.len(); "Levels assigned");

        let mut layout = self.position_nodes(&levels, diagram, direction);
        self.route_edges(&mut layout, diagram, direction);
        self.normalize(&mut layout);

        debug!(
            nodes_len = layout.nodes.len(),
            edges_len = layout.edges.len(),
            width = layout.width,
            height = layout.height;
            "Layout calculated"
        );
        trace!(layout:?; "Calculated layout");

        layout
    }

    fn position_nodes(&self, levels: &Levels<'_>, diagram: &Diagram, direction: Direction) -> Layout {
        // Later declarations of a repeated ID provide its label and shape.
        let sources: HashMap<&str, &Node> = diagram
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();

        let primary = direction.primary_axis();
        let cross = direction.cross_axis();
        let primary_step = self.step(primary);
        let cross_step = self.step(cross);
        let cross_extent = cross.extent(self.node_size);

        let mut layout = Layout::empty(0.0, 0.0);
        for (level_index, level) in levels.iter().enumerate() {
            let along = direction.level_offset(level_index, levels.len(), primary_step)
                + primary.extent(self.node_size) / 2.0;

            let count = level.len() as f64;
            let span = count * cross_extent + (count - 1.0) * self.gap(cross);
            let start = -span / 2.0 + cross_extent / 2.0;

            for (slot, &id) in level.iter().enumerate() {
                let Some(node) = sources.get(id) else {
                    continue;
                };
                let across = start + slot as f64 * cross_step;

                layout.nodes.insert(
                    id.to_string(),
                    LayoutNode {
                        id: id.to_string(),
                        position: primary.point(along, across),
                        size: self.node_size,
                        label: node.label.clone(),
                        shape: node.attribute("shape").unwrap_or("rect").to_string(),
                        style: "solid".to_string(),
                        color: "black".to_string(),
                    },
                );
            }
        }

        layout
    }

    fn route_edges(&self, layout: &mut Layout, diagram: &Diagram, direction: Direction) {
        for edge in &diagram.edges {
            let (Some(from), Some(to)) = (layout.nodes.get(&edge.from), layout.nodes.get(&edge.to))
            else {
                trace!(from = edge.from, to = edge.to; "Dropping edge with unplaced endpoint");
                continue;
            };

            let routed = LayoutEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                points: vec![
                    direction.exit_point(from.position, from.size),
                    direction.entry_point(to.position, to.size),
                ],
                label: edge.label.clone(),
                label_position: from.position.midpoint(to.position),
            };
            layout.edges.push(routed);
        }
    }

    /// Sizes the canvas to the padded node bounding box and moves its
    /// minimum corner to the origin.
    fn normalize(&self, layout: &mut Layout) {
        let Some(bounds) = layout
            .nodes
            .values()
            .map(LayoutNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
        else {
            return;
        };

        let padded: Bounds = bounds.add_padding(self.padding);
        layout.width = padded.width();
        layout.height = padded.height();

        let min = padded.min_point();
        let offset = Point::new(-min.x(), -min.y());

        for node in layout.nodes.values_mut() {
            node.position = node.position.add_point(offset);
        }
        for edge in &mut layout.edges {
            for point in &mut edge.points {
                *point = point.add_point(offset);
            }
            edge.label_position = edge.label_position.add_point(offset);
        }
    }
}
