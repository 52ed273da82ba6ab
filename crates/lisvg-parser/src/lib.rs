//! # lisvg Parser
//!
//! Lexer and parser for the lisvg S-expression diagram language. This crate
//! turns source text into a [`lisvg_core::ast::Diagram`].
//!
//! ## Usage
//!
//! ```
//! # use lisvg_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         (diagram
//!           (size 400 300)
//!           (nodes (id a :label "Client") (id b))
//!           (edges (a b :label "request")))
//!     "#;
//!
//!     let diagram = parse(source)?;
//!     assert_eq!(diagram.nodes.len(), 2);
//!     assert_eq!(diagram.edges[0].label, "request");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
mod span;
pub mod tokens;

pub use error::ParseError;
pub use lexer::{Lexer, tokenize};
pub use parser::Parser;
pub use span::Span;

use log::{debug, info, trace};

use lisvg_core::ast::Diagram;

/// Parse source text into a diagram.
///
/// This is the main entry point: it creates a [`Lexer`] over `source`, a
/// [`Parser`] over that lexer, and parses a single `(diagram ...)` form.
/// Anything after the form's closing paren is ignored.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the first diagnostic the parser hit.
/// No partial diagram is produced.
pub fn parse(source: &str) -> Result<Diagram, ParseError> {
    info!(source_len = source.len(); "Parsing diagram source");

    let mut parser = Parser::new(Lexer::new(source));
    let diagram = parser.parse()?;

    debug!(
        nodes_len = diagram.nodes.len(),
        edges_len = diagram.edges.len();
        "Diagram parsed"
    );
    trace!(diagram:?; "Parsed diagram");

    Ok(diagram)
}
