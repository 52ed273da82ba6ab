//! Output backends for laid-out diagrams.
//!
//! Export is the last pipeline stage:
//!
//! ```text
//! source ─parse─▶ Diagram ─validate─▶ Diagram ─layout─▶ Layout ─export─▶ bytes
//! ```
//!
//! The only backend is [`svg`], which writes a standalone SVG document into
//! any [`std::io::Write`] sink. [`Error`] converts into
//! [`LisvgError::Export`](crate::LisvgError::Export) at the crate boundary.

pub mod svg;

use thiserror::Error;

use crate::layout::Layout;

/// A backend that turns a [`Layout`] into an output format.
pub trait Exporter {
    /// Renders `layout` and writes the result to the backend's sink.
    ///
    /// # Errors
    ///
    /// [`Error::Render`] when the layout cannot be represented, [`Error::Io`]
    /// when writing fails.
    fn export_layout(&mut self, layout: &Layout) -> Result<(), Error>;
}

/// Failure while exporting a layout.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
