//! Error codes for lisvg parse diagnostics.
//!
//! All parser errors live in the `E1xx` range.

use std::fmt;

/// Error codes for categorizing parse diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unexpected token.
    ///
    /// The parser found a token of a different class than the grammar
    /// requires at this position.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before a complete construct was parsed.
    E101,

    /// Invalid integer.
    ///
    /// A `size` dimension is not a valid 64-bit integer.
    E102,

    /// Unknown directive.
    ///
    /// A directive head inside `(diagram ...)` names no known directive.
    E103,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "invalid integer",
            ErrorCode::E103 => "unknown directive",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
