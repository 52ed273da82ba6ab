//! lisvg - Compile S-expression diagram descriptions into laid-out SVG.
//!
//! Parsing, validation, layout, and rendering for the lisvg diagram
//! language. A diagram is a single `(diagram ...)` form listing nodes and
//! the edges between them; the layout engine places nodes in levels and
//! the SVG backend draws the result.

pub mod config;
pub mod export;
pub mod layout;
pub mod validate;

mod error;

pub use lisvg_core::{ast, color, direction, geometry};

pub use error::LisvgError;

use log::{debug, info, trace};

use lisvg_core::geometry::Size;

use ast::Diagram;
use config::AppConfig;
use export::Exporter;
use layout::{Engine, Layout};

/// Builder for parsing and rendering lisvg diagrams.
///
/// This provides an API for processing lisvg diagrams through parsing,
/// validation, layout, and rendering stages. A builder holds configuration
/// only and can be reused for any number of diagrams.
///
/// # Examples
///
/// ```rust
/// use lisvg::{DiagramBuilder, config::AppConfig};
///
/// let source = "(diagram (nodes (id a) (id b)) (edges (a b)))";
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Parse source to a diagram
/// let diagram = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render the diagram to SVG
/// let svg = builder.render_svg(&diagram)
///     .expect("Failed to render");
///
/// // Or run the whole pipeline at once with the default config
/// let svg = DiagramBuilder::default().compile(source)
///     .expect("Failed to compile");
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the builder's configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source code into a diagram.
    ///
    /// # Errors
    ///
    /// Returns [`LisvgError::Parse`] carrying the diagnostics and the source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lisvg::DiagramBuilder;
    ///
    /// let diagram = DiagramBuilder::default()
    ///     .parse("(diagram (size 640 480))")
    ///     .expect("Failed to parse diagram");
    /// assert_eq!(diagram.width, 640);
    /// ```
    pub fn parse(&self, source: &str) -> Result<Diagram, LisvgError> {
        info!("Parsing diagram");

        let diagram = lisvg_parser::parse(source)
            .map_err(|err| LisvgError::new_parse_error(err, source))?;

        debug!("Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Check a diagram for semantic errors.
    ///
    /// # Errors
    ///
    /// Returns [`LisvgError::Validation`] with every problem found.
    pub fn validate(&self, diagram: &Diagram) -> Result<(), LisvgError> {
        info!(nodes_len = diagram.nodes.len(), edges_len = diagram.edges.len(); "Validating diagram");
        validate::validate(diagram)?;
        debug!("Diagram is valid");
        Ok(())
    }

    /// Lay out a diagram with the configured engine settings.
    ///
    /// A `direction` directive in the diagram takes precedence over the
    /// configured direction.
    pub fn layout(&self, diagram: &Diagram) -> Layout {
        self.engine().layout_diagram(diagram)
    }

    /// Render a diagram to an SVG string.
    ///
    /// This lays the diagram out and exports the layout, styled with the
    /// diagram's `node-style`/`edge-style` tables and the configured style.
    ///
    /// # Errors
    ///
    /// Returns [`LisvgError::Config`] for an invalid background color and
    /// [`LisvgError::Export`] if rendering fails.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, LisvgError> {
        let background_color = self
            .config
            .style()
            .background_color()
            .map_err(LisvgError::Config)?;

        let layout = self.layout(diagram);
        info!(width = layout.width, height = layout.height; "Layout calculated");

        let mut svg_exporter = export::svg::SvgBuilder::new(Vec::new())
            .with_styles(&diagram.node_style, &diagram.edge_style)
            .with_font_family(self.config.style().font_family())
            .with_background_color(background_color)
            .build();

        svg_exporter.export_layout(&layout)?;

        let svg_string = String::from_utf8(svg_exporter.into_inner())
            .map_err(|err| export::Error::Render(err.to_string()))?;

        info!("SVG rendered successfully");
        Ok(svg_string)
    }

    /// Run the whole pipeline: parse, validate, lay out and render.
    ///
    /// # Errors
    ///
    /// Returns the first stage's error.
    pub fn compile(&self, source: &str) -> Result<String, LisvgError> {
        let diagram = self.parse(source)?;
        self.validate(&diagram)?;
        self.render_svg(&diagram)
    }

    fn engine(&self) -> Engine {
        let layout = self.config.layout();
        Engine::new()
            .with_node_size(Size::new(layout.node_width(), layout.node_height()))
            .with_horizontal_gap(layout.horizontal_gap())
            .with_vertical_gap(layout.vertical_gap())
            .with_padding(layout.padding())
            .with_direction(layout.direction())
    }
}
