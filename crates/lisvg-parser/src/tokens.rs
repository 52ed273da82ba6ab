//! Token types for the lisvg S-expression language.

use std::fmt;

use crate::span::Span;

/// The class of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Any bare run of non-whitespace, non-paren characters.
    Atom,
    /// `:name`; the token text excludes the colon.
    Keyword,
    /// `"..."`; the token text excludes the quotes.
    Str,
    /// End of input. Returned repeatedly once reached.
    Eof,
}

impl TokenKind {
    /// Returns `true` for tokens usable as a value (atoms and strings).
    pub fn is_value(self) -> bool {
        matches!(self, TokenKind::Atom | TokenKind::Str)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Atom => write!(f, "atom"),
            TokenKind::Keyword => write!(f, "keyword"),
            TokenKind::Str => write!(f, "string"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its text and position in the source.
///
/// `text` borrows from the source verbatim: string tokens carry their raw
/// content between the quotes, keyword tokens the name after the colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Creates an end-of-input token at `offset`.
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", Span::new(offset..offset))
    }

    /// Returns `true` if this is an atom with exactly the given text.
    pub fn is_atom(&self, text: &str) -> bool {
        self.kind == TokenKind::Atom && self.text == text
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::LParen | TokenKind::RParen | TokenKind::Eof => self.kind.fmt(f),
            TokenKind::Atom => write!(f, "atom `{}`", self.text),
            TokenKind::Keyword => write!(f, "keyword `:{}`", self.text),
            TokenKind::Str => write!(f, "string \"{}\"", self.text),
        }
    }
}
