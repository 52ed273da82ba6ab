//! SVG export backend.
//!
//! Layout coordinates are y-up. The document flips them with a single
//! `scale(1, -1)` group transform, and labels flip themselves back so text
//! stays upright.

use std::io::Write;

use log::{debug, error, info};
use svg::{self, node::element as svg_element};

use lisvg_core::{ast::Attributes, color::Color, geometry::Size};

use crate::{
    export,
    layout::{Layout, LayoutEdge, LayoutNode},
};

/// Margin between the layout canvas and the document edge.
const MARGIN: f64 = 20.0;

/// Node style keys copied into the `.node` rule.
const NODE_STYLE_KEYS: [&str; 3] = ["fill", "stroke", "stroke-width"];

/// Edge style keys copied into the `.edge` rule.
const EDGE_STYLE_KEYS: [&str; 3] = ["stroke", "stroke-width", "stroke-dasharray"];

const ARROWHEAD_ID: &str = "arrowhead";

/// The SVG primitive used to draw a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeShape {
    Rect,
    Ellipse,
    Diamond,
}

impl NodeShape {
    /// Maps a `shape` attribute value, case-insensitively, to a primitive.
    /// Unrecognised names are drawn as ellipses.
    fn from_attribute(shape: &str) -> Self {
        match shape.to_lowercase().as_str() {
            "box" | "rect" | "rectangle" => Self::Rect,
            "diamond" | "rhombus" => Self::Diamond,
            _ => Self::Ellipse,
        }
    }

    fn class_name(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Diamond => "diamond",
        }
    }
}

/// Builder for [`Svg`] exporters.
///
/// # Example
///
/// ```
/// # use lisvg::export::{Exporter, svg::SvgBuilder};
/// # use lisvg::layout::Layout;
/// let mut exporter = SvgBuilder::new(Vec::new())
///     .with_font_family("monospace")
///     .build();
/// exporter.export_layout(&Layout::empty(100.0, 50.0)).unwrap();
///
/// let svg = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(svg.contains("font-family: monospace"));
/// ```
pub struct SvgBuilder<W> {
    writer: W,
    node_style: Attributes,
    edge_style: Attributes,
    font_family: String,
    background_color: Option<Color>,
}

impl<W: Write> SvgBuilder<W> {
    /// Creates a builder writing the finished document to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            node_style: Attributes::new(),
            edge_style: Attributes::new(),
            font_family: "Arial, sans-serif".to_string(),
            background_color: None,
        }
    }

    /// Set the diagram-level default attributes for nodes and edges
    pub fn with_styles(mut self, node_style: &Attributes, edge_style: &Attributes) -> Self {
        self.node_style = node_style.clone();
        self.edge_style = edge_style.clone();
        self
    }

    /// Set the CSS font family used for labels
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    /// Set the background color. No background is drawn when `None`.
    pub fn with_background_color(mut self, color: Option<Color>) -> Self {
        self.background_color = color;
        self
    }

    pub fn build(self) -> Svg<W> {
        Svg {
            writer: self.writer,
            node_style: self.node_style,
            edge_style: self.edge_style,
            font_family: self.font_family,
            background_color: self.background_color,
        }
    }
}

/// SVG exporter writing into `W`.
pub struct Svg<W> {
    writer: W,
    node_style: Attributes,
    edge_style: Attributes,
    font_family: String,
    background_color: Option<Color>,
}

impl<W> Svg<W> {
    /// Consumes the exporter and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Renders `layout` to an SVG document.
    pub fn render_layout(&self, layout: &Layout) -> svg::Document {
        let svg_size = Self::calculate_svg_dimensions(layout.size());

        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        let doc = self.add_background(doc, svg_size);
        let doc = doc
            .add(svg_element::Style::new(self.stylesheet()))
            .add(Self::marker_definitions());

        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!(
                "translate({}, {}) scale(1, -1)",
                MARGIN,
                svg_size.height() - MARGIN
            ),
        );

        // Edges first so nodes are drawn on top of them.
        for edge in &layout.edges {
            main_group = self.render_edge(main_group, edge);
        }
        for node in layout.nodes.values() {
            main_group = self.render_node(main_group, node);
        }

        doc.add(main_group)
    }

    fn calculate_svg_dimensions(content_size: Size) -> Size {
        let width = MARGIN.mul_add(2.0, content_size.width());
        let height = MARGIN.mul_add(2.0, content_size.height());

        debug!(width = width, height = height; "Final SVG dimensions");

        Size::new(width, height)
    }

    fn add_background(&self, doc: svg::Document, size: Size) -> svg::Document {
        let Some(color) = &self.background_color else {
            return doc;
        };

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", color);

        doc.add(background)
    }

    fn stylesheet(&self) -> String {
        let mut css = String::new();

        css.push_str(".node {\n  fill: #ffffff;\n  stroke: #000000;\n  stroke-width: 1;\n");
        push_overrides(&mut css, &self.node_style, &NODE_STYLE_KEYS);
        css.push_str("}\n");

        css.push_str(".edge {\n  fill: none;\n  stroke: #000000;\n  stroke-width: 1;\n");
        push_overrides(&mut css, &self.edge_style, &EDGE_STYLE_KEYS);
        css.push_str("}\n");

        for (class, font_size) in [("node-label", 12), ("edge-label", 10)] {
            css.push_str(&format!(
                ".{class} {{\n  font-family: {};\n  font-size: {font_size}px;\n  \
                 text-anchor: middle;\n  dominant-baseline: middle;\n  fill: #000000;\n  \
                 pointer-events: none;\n}}\n",
                self.font_family
            ));
        }

        css
    }

    fn marker_definitions() -> svg_element::Definitions {
        let arrowhead = svg_element::Marker::new()
            .set("id", ARROWHEAD_ID)
            .set("markerWidth", 10)
            .set("markerHeight", 7)
            .set("refX", 9)
            .set("refY", 3.5)
            .set("orient", "auto")
            .add(
                svg_element::Polygon::new()
                    .set("points", "0 0, 10 3.5, 0 7")
                    .set("fill", "#000000"),
            );

        svg_element::Definitions::new().add(arrowhead)
    }

    fn render_edge(&self, group: svg_element::Group, edge: &LayoutEdge) -> svg_element::Group {
        let Some(data) = path_data(edge) else {
            return group;
        };

        let path = svg_element::Path::new()
            .set("d", data)
            .set("class", "edge")
            .set("marker-end", format!("url(#{ARROWHEAD_ID})"));
        let group = group.add(path);

        if edge.label.is_empty() {
            return group;
        }
        let position = edge.label_position;
        group.add(label(&edge.label, "edge-label", position.x(), position.y()))
    }

    fn render_node(&self, group: svg_element::Group, node: &LayoutNode) -> svg_element::Group {
        let shape = NodeShape::from_attribute(&node.shape);
        let class = format!("node {}", shape.class_name());
        let (x, y) = (node.x(), node.y());
        let (half_width, half_height) = (node.width() / 2.0, node.height() / 2.0);

        let group = match shape {
            NodeShape::Rect => group.add(
                svg_element::Rectangle::new()
                    .set("x", x - half_width)
                    .set("y", y - half_height)
                    .set("width", node.width())
                    .set("height", node.height())
                    .set("class", class),
            ),
            NodeShape::Diamond => {
                let points = format!(
                    "{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                    x,
                    y - half_height,
                    x + half_width,
                    y,
                    x,
                    y + half_height,
                    x - half_width,
                    y
                );
                group.add(
                    svg_element::Polygon::new()
                        .set("points", points)
                        .set("class", class),
                )
            }
            NodeShape::Ellipse => group.add(
                svg_element::Ellipse::new()
                    .set("cx", x)
                    .set("cy", y)
                    .set("rx", half_width)
                    .set("ry", half_height)
                    .set("class", class),
            ),
        };

        if node.label.is_empty() {
            return group;
        }
        group.add(label(&node.label, "node-label", x, y))
    }
}

impl<W: Write> export::Exporter for Svg<W> {
    fn export_layout(&mut self, layout: &Layout) -> Result<(), export::Error> {
        info!(nodes_len = layout.nodes.len(), edges_len = layout.edges.len(); "Rendering SVG");
        let doc = self.render_layout(layout);
        debug!("SVG document rendered");

        if let Err(err) = svg::write(&mut self.writer, &doc) {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

fn push_overrides(css: &mut String, style: &Attributes, keys: &[&str]) {
    for (key, value) in style {
        if keys.contains(&key.as_str()) {
            css.push_str(&format!("  {key}: {value};\n"));
        }
    }
}

/// Path data through the edge's points: a line for two points, a quadratic
/// curve continued with smooth segments for more.
fn path_data(edge: &LayoutEdge) -> Option<String> {
    let [first, rest @ ..] = edge.points.as_slice() else {
        return None;
    };
    if rest.is_empty() {
        return None;
    }

    let mut data = format!("M {:.2} {:.2}", first.x(), first.y());
    if let [end] = rest {
        data.push_str(&format!(" L {:.2} {:.2}", end.x(), end.y()));
        return Some(data);
    }

    let last = rest.len() - 1;
    for (i, point) in rest.iter().enumerate() {
        let command = match i {
            0 => "Q ",
            _ if i == last => "",
            _ => "T ",
        };
        data.push_str(&format!(" {command}{:.2} {:.2}", point.x(), point.y()));
    }
    Some(data)
}

/// Text at layout position (`x`, `y`), un-flipped against the main group.
fn label(text: &str, class: &str, x: f64, y: f64) -> svg_element::Text {
    svg_element::Text::new(text)
        .set("x", x)
        .set("y", -y)
        .set("class", class)
        .set("transform", "scale(1, -1)")
}

#[cfg(test)]
mod tests {
    use lisvg_core::{
        ast::{Diagram, Edge, Node},
        geometry::Point,
    };

    use super::*;
    use crate::{export::Exporter, layout::Engine};

    fn render_with(builder: SvgBuilder<Vec<u8>>, layout: &Layout) -> String {
        let mut exporter = builder.build();
        exporter.export_layout(layout).unwrap();
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    fn render(layout: &Layout) -> String {
        render_with(SvgBuilder::new(Vec::new()), layout)
    }

    fn chain() -> Diagram {
        let mut diagram = Diagram::new();
        diagram.nodes = vec![
            Node::new("a").with_label("Start"),
            Node::new("b").with_attribute("shape", "diamond"),
            Node::new("c").with_attribute("shape", "Circle"),
        ];
        diagram.edges = vec![
            Edge::new("a", "b").with_label("next"),
            Edge::new("b", "c"),
        ];
        diagram
    }

    fn edge_through(points: Vec<Point>) -> LayoutEdge {
        LayoutEdge {
            from: "a".to_string(),
            to: "b".to_string(),
            points,
            label: String::new(),
            label_position: Point::default(),
        }
    }

    #[test]
    fn test_node_shape_mapping() {
        assert_eq!(NodeShape::from_attribute("box"), NodeShape::Rect);
        assert_eq!(NodeShape::from_attribute("RECTANGLE"), NodeShape::Rect);
        assert_eq!(NodeShape::from_attribute("rhombus"), NodeShape::Diamond);
        assert_eq!(NodeShape::from_attribute("oval"), NodeShape::Ellipse);
        assert_eq!(NodeShape::from_attribute("circle"), NodeShape::Ellipse);
        assert_eq!(NodeShape::from_attribute("hexagon"), NodeShape::Ellipse);
        assert_eq!(NodeShape::from_attribute(""), NodeShape::Ellipse);
    }

    #[test]
    fn test_document_size_adds_margin() {
        let svg = render(&Layout::empty(180.0, 130.0));

        assert!(svg.contains(r#"viewBox="0 0 220 170""#));
        assert!(svg.contains(r#"width="220""#));
        assert!(svg.contains(r#"height="170""#));
        assert!(svg.contains("translate(20, 150) scale(1, -1)"));
    }

    #[test]
    fn test_empty_layout_has_no_shapes() {
        let svg = render(&Layout::empty(800.0, 400.0));

        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"id="arrowhead""#));
        assert!(!svg.contains("<rect"));
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_renders_nodes_edges_and_labels() {
        let layout = Engine::new().layout_diagram(&chain());
        let svg = render(&layout);

        assert!(svg.contains(r#"class="node rect""#));
        assert!(svg.contains(r#"class="node diamond""#));
        assert!(svg.contains(r#"class="node ellipse""#));
        assert_eq!(svg.matches(r#"class="edge""#).count(), 2);
        assert_eq!(svg.matches("url(#arrowhead)").count(), 2);
        // Text content is written on its own line.
        assert!(svg.contains("\nStart\n</text>"));
        assert!(svg.contains("\nnext\n</text>"));
        assert_eq!(svg.matches(r#"class="edge-label""#).count(), 1);
        assert_eq!(svg.matches(r#"class="node-label""#).count(), 3);
    }

    #[test]
    fn test_edges_are_drawn_before_nodes() {
        let layout = Engine::new().layout_diagram(&chain());
        let svg = render(&layout);

        let first_path = svg.find("<path").unwrap();
        let first_node = svg.find(r#"class="node "#).unwrap();
        assert!(first_path < first_node);
    }

    #[test]
    fn test_labels_are_unflipped() {
        let layout = Engine::new().layout_diagram(&chain());
        let node = layout.node("a").unwrap();
        let svg = render(&layout);

        assert!(svg.contains(&format!(r#"y="{}""#, -node.y())));
        assert!(svg.contains(r#"transform="scale(1, -1)""#));
    }

    #[test]
    fn test_label_text_is_escaped() {
        let mut diagram = Diagram::new();
        diagram.nodes.push(Node::new("a").with_label("a<b & c"));
        let svg = render(&Engine::new().layout_diagram(&diagram));

        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(!svg.contains("a<b"));
    }

    #[test]
    fn test_style_overrides_filter_known_keys() {
        let mut node_style = Attributes::new();
        node_style.insert("fill".to_string(), "#eef".to_string());
        node_style.insert("font-size".to_string(), "20".to_string());
        let mut edge_style = Attributes::new();
        edge_style.insert("stroke-dasharray".to_string(), "4 2".to_string());
        edge_style.insert("fill".to_string(), "red".to_string());

        let svg = render_with(
            SvgBuilder::new(Vec::new()).with_styles(&node_style, &edge_style),
            &Layout::empty(10.0, 10.0),
        );

        assert!(svg.contains("fill: #eef;"));
        assert!(svg.contains("stroke-dasharray: 4 2;"));
        assert!(!svg.contains("font-size: 20"));
        assert!(!svg.contains("fill: red;"));
    }

    #[test]
    fn test_default_stylesheet() {
        let svg = render(&Layout::empty(10.0, 10.0));

        assert!(svg.contains(".node {"));
        assert!(svg.contains(".edge {"));
        assert!(svg.contains("fill: none;"));
        assert!(svg.contains("font-family: Arial, sans-serif;"));
        assert!(svg.contains("font-size: 12px;"));
        assert!(svg.contains("font-size: 10px;"));
    }

    #[test]
    fn test_background_color() {
        let color = Color::new("#fafafa").unwrap();
        let svg = render_with(
            SvgBuilder::new(Vec::new()).with_background_color(Some(color)),
            &Layout::empty(10.0, 10.0),
        );

        assert!(svg.contains("<rect"));
        assert!(svg.contains(&format!(r#"fill="{color}""#)));
    }

    #[test]
    fn test_straight_path_data() {
        let edge = edge_through(vec![Point::new(1.0, 2.0), Point::new(3.5, 4.25)]);

        assert_eq!(
            path_data(&edge).unwrap(),
            "M 1.00 2.00 L 3.50 4.25"
        );
    }

    #[test]
    fn test_curved_path_data() {
        let edge = edge_through(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ]);

        assert_eq!(
            path_data(&edge).unwrap(),
            "M 0.00 0.00 Q 1.00 1.00 T 2.00 2.00 3.00 3.00"
        );
    }

    #[test]
    fn test_degenerate_edge_is_skipped() {
        assert_eq!(path_data(&edge_through(vec![])), None);
        assert_eq!(path_data(&edge_through(vec![Point::new(1.0, 1.0)])), None);
    }
}
