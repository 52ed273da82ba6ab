//! Error types for lisvg operations.
//!
//! This module provides the main error type [`LisvgError`] which wraps
//! every error condition of the parse, validate, layout and render pipeline.

use std::io;

use thiserror::Error;

use lisvg_parser::ParseError;

use crate::validate::ValidationErrors;

/// The main error type for lisvg operations.
///
/// The `Parse` variant keeps the source text next to the diagnostics so the
/// reporting layer can render labelled snippets.
#[derive(Debug, Error)]
pub enum LisvgError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for LisvgError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl LisvgError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
