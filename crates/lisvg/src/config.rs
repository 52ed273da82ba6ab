//! Configuration types for lisvg layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field is optional in the file; missing fields take the
//! defaults listed below.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Node extents, gaps, canvas padding and direction.
//! - [`StyleConfig`] - Background color and label font.
//!
//! # Example
//!
//! ```
//! # use lisvg::config::AppConfig;
//! # use lisvg_core::direction::Direction;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width(), 100.0);
//! assert_eq!(config.layout().direction(), Direction::TopToBottom);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use lisvg_core::{color::Color, direction::Direction};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the configured layout direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.layout.direction = direction;
        self
    }
}

/// Layout engine settings.
///
/// | Key              | Default         |
/// |------------------|-----------------|
/// | `node_width`     | `100`           |
/// | `node_height`    | `50`            |
/// | `horizontal_gap` | `80`            |
/// | `vertical_gap`   | `80`            |
/// | `padding`        | `40`            |
/// | `direction`      | `top-to-bottom` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f64,
    node_height: f64,
    horizontal_gap: f64,
    vertical_gap: f64,
    padding: f64,
    direction: Direction,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 100.0,
            node_height: 50.0,
            horizontal_gap: 80.0,
            vertical_gap: 80.0,
            padding: 40.0,
            direction: Direction::default(),
        }
    }
}

impl LayoutConfig {
    pub fn node_width(&self) -> f64 {
        self.node_width
    }

    pub fn node_height(&self) -> f64 {
        self.node_height
    }

    pub fn horizontal_gap(&self) -> f64 {
        self.horizontal_gap
    }

    pub fn vertical_gap(&self) -> f64 {
        self.vertical_gap
    }

    /// Padding added on every side of the node bounding box.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Default direction for diagrams without a `direction` directive.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background [`Color`] as a CSS color string. No background when unset.
    background_color: Option<String>,

    /// CSS font family for node and edge labels.
    font_family: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            font_family: "Arial, sans-serif".to_string(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }
}
