//! Lexical analyzer for lisvg source text.
//!
//! The [`Lexer`] is a pull-based token source: every call to
//! [`Lexer::next_token`] skips blanks and `;` line comments, then scans
//! exactly one token. It never backtracks and never fails. Malformed input
//! always resolves into *some* token stream, and end of input is reported as
//! an [`TokenKind::Eof`] token as many times as it is asked for.
//!
//! String literals take every character up to the next `"` verbatim. There
//! is no escape processing, so `\"` does not escape the quote. A string
//! that is never closed runs to the end of the input.

use winnow::{
    Parser as _,
    combinator::{alt, dispatch, opt, peek, preceded, repeat, terminated},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location},
    token::{any, take_till, take_while},
};

use crate::{
    span::Span,
    tokens::{Token, TokenKind},
};

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = ModalResult<O, ContextError>;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_atom_char(c: char) -> bool {
    !is_blank(c) && c != '(' && c != ')'
}

/// Skip any interleaving of whitespace runs and `;` comments.
fn blank(input: &mut Input<'_>) -> IResult<()> {
    repeat(
        0..,
        alt((
            take_while(1.., is_blank).void(),
            (';', take_till(0.., ['\n', '\r'])).void(),
        )),
    )
    .parse_next(input)
}

/// Parse a string literal, returning the raw text between the quotes.
///
/// The closing quote is optional so unterminated strings still produce a
/// token holding the rest of the input.
fn string_literal<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    terminated(preceded('"', take_till(0.., '"')), opt('"')).parse_next(input)
}

/// Parse a keyword, returning its name without the leading colon.
fn keyword<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    preceded(':', take_while(0.., is_atom_char)).parse_next(input)
}

fn atom<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., is_atom_char).parse_next(input)
}

/// Scan a single token. Fails only when the input is exhausted.
fn token<'src>(input: &mut Input<'src>) -> IResult<(TokenKind, &'src str)> {
    dispatch! {peek(any);
        '(' => '('.take().map(|text| (TokenKind::LParen, text)),
        ')' => ')'.take().map(|text| (TokenKind::RParen, text)),
        '"' => string_literal.map(|text| (TokenKind::Str, text)),
        ':' => keyword.map(|text| (TokenKind::Keyword, text)),
        _ => atom.map(|text| (TokenKind::Atom, text)),
    }
    .parse_next(input)
}

/// Pull-based tokenizer over a source string.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    input: Input<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            input: LocatingSlice::new(source),
        }
    }

    /// Produce the next token.
    ///
    /// Once the input is exhausted every call returns an EOF token.
    pub fn next_token(&mut self) -> Token<'src> {
        // `blank` matches zero or more items and cannot fail.
        let _ = blank.parse_next(&mut self.input);

        let start = self.input.current_token_start();
        match token.parse_next(&mut self.input) {
            Ok((kind, text)) => {
                let end = self.input.current_token_start();
                Token::new(kind, text, Span::new(start..end))
            }
            Err(_) => Token::eof(start),
        }
    }
}

/// Tokenize a whole source string, excluding the final EOF token.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}
