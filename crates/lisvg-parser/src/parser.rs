//! Recursive-descent parser for lisvg diagrams.
//!
//! The [`Parser`] pulls tokens from a [`Lexer`] and holds two of them at a
//! time: the current token, which every decision is made on, and the next
//! one. Advancing shifts the next token into the current slot and pulls a
//! fresh one from the lexer.
//!
//! # Grammar
//!
//! ```text
//! diagram    := '(' 'diagram' directive* ')'
//! directive  := '(' 'size' INT INT ')'
//!             | '(' 'direction' ATOM ')'
//!             | '(' 'node-style' kvpair* ')'
//!             | '(' 'edge-style' kvpair* ')'
//!             | '(' 'nodes' nodeDecl* ')'
//!             | '(' 'edges' edgeDecl* ')'
//! nodeDecl   := '(' 'id' VALUE kvpair* ')'
//! edgeDecl   := '(' VALUE VALUE kvpair* ')'
//! kvpair     := KEYWORD VALUE
//! VALUE      := ATOM | STRING
//! ```
//!
//! The grammar has no error recovery: the first mismatch aborts the parse.

use log::trace;

use lisvg_core::{
    ast::{Attributes, Diagram, Edge, Node},
    direction::Direction,
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError, Result},
    lexer::Lexer,
    span::Span,
    tokens::{Token, TokenKind},
};

const DIRECTIVES: &str = "`size`, `direction`, `node-style`, `edge-style`, `nodes`, `edges`";

/// Keyword/value pairs in source order.
type Pairs<'src> = Vec<(&'src str, &'src str)>;

/// A two-token-lookahead parser over a [`Lexer`].
#[derive(Debug, Clone)]
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    peek: Token<'src>,
}

impl<'src> Parser<'src> {
    /// Creates a parser, priming the current and next tokens.
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
        }
    }

    /// The token the parser is looking at.
    pub fn current_token(&self) -> Token<'src> {
        self.current
    }

    /// The token after the current one.
    pub fn peek_token(&self) -> Token<'src> {
        self.peek
    }

    /// Parses one `(diagram ...)` form.
    ///
    /// Tokens after the diagram's closing paren are never read, and the
    /// closing paren itself stays the current token. The parser keeps its
    /// position on failure, so a second call resumes from wherever the first
    /// one stopped.
    pub fn parse(&mut self) -> std::result::Result<Diagram, ParseError> {
        self.parse_diagram().map_err(ParseError::from)
    }

    fn advance(&mut self) {
        self.current = self.peek;
        self.peek = self.lexer.next_token();
    }

    /// Builds the error for a current token that does not fit `expected`.
    fn unexpected(&self, expected: &str) -> Diagnostic {
        let found = self.current;
        if found.kind == TokenKind::Eof {
            Diagnostic::error(format!("expected {expected}, found end of input"))
                .with_code(ErrorCode::E101)
                .with_label(found.span, "input ends here")
        } else {
            Diagnostic::error(format!("expected {expected}, found {found}"))
                .with_code(ErrorCode::E100)
                .with_label(found.span, format!("expected {expected}"))
        }
    }

    /// Consumes a token of `kind`, or fails naming `expected`.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'src>> {
        if self.current.kind != kind {
            return Err(self.unexpected(expected));
        }
        let token = self.current;
        self.advance();
        Ok(token)
    }

    /// Consumes an atom or string token.
    fn expect_value(&mut self, expected: &str) -> Result<Token<'src>> {
        if !self.current.kind.is_value() {
            return Err(self.unexpected(expected));
        }
        let token = self.current;
        self.advance();
        Ok(token)
    }

    /// Consumes an atom with exactly the given text.
    fn expect_literal(&mut self, text: &str) -> Result<Token<'src>> {
        if !self.current.is_atom(text) {
            return Err(self.unexpected(&format!("`{text}`")));
        }
        let token = self.current;
        self.advance();
        Ok(token)
    }

    /// Consumes the `)` closing the form opened at `open`.
    fn expect_close(&mut self, open: Span) -> Result<Token<'src>> {
        self.expect(TokenKind::RParen, "`)`")
            .map_err(|diag| diag.with_secondary_label(open, "form opened here"))
    }

    fn parse_diagram(&mut self) -> Result<Diagram> {
        let open = self.expect(TokenKind::LParen, "`(`")?;
        self.expect_literal("diagram")?;

        let mut diagram = Diagram::new();
        while !matches!(self.current.kind, TokenKind::RParen | TokenKind::Eof) {
            self.parse_directive(&mut diagram)?;
        }

        if self.current.kind != TokenKind::RParen {
            return Err(self
                .unexpected("`)`")
                .with_secondary_label(open.span, "diagram opened here"));
        }

        Ok(diagram)
    }

    fn parse_directive(&mut self, diagram: &mut Diagram) -> Result<()> {
        let open = self.expect(TokenKind::LParen, "`(`")?.span;

        let head = self.current;
        if head.kind != TokenKind::Atom {
            return Err(self
                .unexpected("directive name")
                .with_help(format!("expected one of {DIRECTIVES}")));
        }
        trace!(directive = head.text; "Parsing directive");
        self.advance();

        match head.text {
            "size" => self.parse_size(diagram, open),
            "direction" => self.parse_direction(diagram, open),
            "node-style" => {
                for (key, value) in self.parse_pairs()? {
                    diagram.node_style.insert(key.to_string(), value.to_string());
                }
                Ok(())
            }
            "edge-style" => {
                for (key, value) in self.parse_pairs()? {
                    diagram.edge_style.insert(key.to_string(), value.to_string());
                }
                Ok(())
            }
            "nodes" => self.parse_nodes(diagram),
            "edges" => self.parse_edges(diagram),
            other => Err(Diagnostic::error(format!("unknown directive `{other}`"))
                .with_code(ErrorCode::E103)
                .with_label(head.span, "unknown directive")
                .with_help(format!("expected one of {DIRECTIVES}"))),
        }
    }

    fn parse_size(&mut self, diagram: &mut Diagram, open: Span) -> Result<()> {
        diagram.width = self.parse_int("width")?;
        diagram.height = self.parse_int("height")?;
        self.expect_close(open)?;
        Ok(())
    }

    /// Parses a signed 64-bit integer atom, naming `dimension` on failure.
    fn parse_int(&mut self, dimension: &str) -> Result<i64> {
        let token = self.expect(TokenKind::Atom, dimension)?;
        token.text.parse::<i64>().map_err(|err| {
            Diagnostic::error(format!("invalid {dimension} `{}`: {err}", token.text))
                .with_code(ErrorCode::E102)
                .with_label(token.span, format!("{dimension} must be an integer"))
                .with_help("`size` takes two integers, e.g. `(size 800 400)`")
        })
    }

    fn parse_direction(&mut self, diagram: &mut Diagram, open: Span) -> Result<()> {
        let token = self.expect(TokenKind::Atom, "direction")?;
        let direction = token.text.parse::<Direction>().map_err(|err| {
            Diagnostic::error(err.to_string())
                .with_code(ErrorCode::E100)
                .with_label(token.span, "unknown direction")
        })?;
        self.expect_close(open)?;

        diagram.direction = Some(direction);
        Ok(())
    }

    /// Parses `KEYWORD VALUE` pairs up to and including the closing `)`.
    fn parse_pairs(&mut self) -> Result<Pairs<'src>> {
        let mut pairs = Vec::new();
        while self.current.kind != TokenKind::RParen {
            let key = self.expect(TokenKind::Keyword, "keyword")?;
            let value = self.expect_value("value")?;
            pairs.push((key.text, value.text));
        }
        self.advance();
        Ok(pairs)
    }

    /// Splits `label` out of attribute pairs. Later keys win.
    fn split_label(pairs: Pairs<'src>) -> (Option<&'src str>, Attributes) {
        let mut label = None;
        let mut attributes = Attributes::new();
        for (key, value) in pairs {
            if key == "label" {
                label = Some(value);
            } else {
                attributes.insert(key.to_string(), value.to_string());
            }
        }
        (label, attributes)
    }

    fn parse_nodes(&mut self, diagram: &mut Diagram) -> Result<()> {
        while self.current.kind != TokenKind::RParen {
            self.expect(TokenKind::LParen, "`(`")?;
            self.expect_literal("id")?;
            let id = self.expect_value("node id")?;

            let (label, attributes) = Self::split_label(self.parse_pairs()?);
            let mut node = Node::new(id.text);
            if let Some(label) = label {
                node.label = label.to_string();
            }
            node.attributes = attributes;
            diagram.nodes.push(node);
        }
        self.advance();
        Ok(())
    }

    fn parse_edges(&mut self, diagram: &mut Diagram) -> Result<()> {
        while self.current.kind != TokenKind::RParen {
            self.expect(TokenKind::LParen, "`(`")?;
            let from = self.expect_value("from node")?;
            let to = self.expect_value("to node")?;

            let (label, attributes) = Self::split_label(self.parse_pairs()?);
            let mut edge = Edge::new(from.text, to.text);
            if let Some(label) = label {
                edge.label = label.to_string();
            }
            edge.attributes = attributes;
            diagram.edges.push(edge);
        }
        self.advance();
        Ok(())
    }
}
