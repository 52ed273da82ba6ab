//! Diagnostic error system for the lisvg parser.
//!
//! - [`Diagnostic`] - a single error with code, labelled spans and help text
//! - [`ErrorCode`] - stable codes for every class of parse failure
//! - [`Label`] - a message attached to a source span
//! - [`ParseError`] - the error returned by [`crate::parse`]

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::{ParseError, Result};
