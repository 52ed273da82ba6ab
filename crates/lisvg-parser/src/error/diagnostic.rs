//! The core diagnostic type for lisvg parse errors.

use std::fmt;

use crate::{
    error::{ErrorCode, Label},
    span::Span,
};

/// A parse error with source location information.
///
/// ```text
/// error[E100]: expected value, found keyword `:label`
///   --> diagram.sxd:3:14
///    |
///  3 | (nodes (id :label "A"))
///    |            ^^^^^^ expected value
///    |
///    = help: node IDs are atoms or strings
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use lisvg_parser::error::{Diagnostic, ErrorCode};
    /// # use lisvg_parser::Span;
    /// let diag = Diagnostic::error("unknown directive `colors`")
    ///     .with_code(ErrorCode::E103)
    ///     .with_label(Span::new(10..16), "unknown directive")
    ///     .with_help("expected one of `size`, `nodes`, `edges`");
    ///
    /// assert_eq!(diag.to_string(), "error[E103]: unknown directive `colors`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("test error");

        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_labels() {
        let diag = Diagnostic::error("expected `)`, found end of input")
            .with_label(Span::new(20..20), "input ends here")
            .with_secondary_label(Span::new(0..1), "form opened here");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("invalid width `abc`").with_code(ErrorCode::E102);

        assert_eq!(diag.to_string(), "error[E102]: invalid width `abc`");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        assert_eq!(Diagnostic::error("oops").to_string(), "error: oops");
    }
}
