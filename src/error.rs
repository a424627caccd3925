//! Component F: tagged lexer/parser errors carrying a source location.
//!
//! The teacher crate hand-rolls `Display` for its `ParseError`/
//! `ImplementationError` pair (see `SyntaxError: {message}`); this crate
//! keeps the same "a kind plus where it happened" shape but derives the
//! boilerplate with `thiserror`, which is the idiomatic equivalent once
//! the dependency is available.

use crate::position::Location;
use crate::token::TokenKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Unexpected character '{0}' found.")]
    UnexpectedChar(char),
    #[error("Unexpected identifier '{0}' found.")]
    UnexpectedIdentifier(String),
    #[error("Unexpected token {0} found.")]
    UnexpectedToken(TokenKind),
    #[error("Unexpected end of input found.")]
    UnexpectedEof,
    #[error("Invalid unicode escape \\u{0}.")]
    InvalidUnicodeEscape(String),
    #[error("Invalid escape \\{0}.")]
    InvalidEscape(char),
    #[error("Cannot evaluate a bare element or member node.")]
    MisplacedContainerNode,
}

/// A lexer/parser/evaluate failure, with the location it was raised at.
///
/// Where the offending sequence straddles a token (a bad `\uXXXX` inside a
/// string), `location` points at the backslash, not at the enclosing
/// token's start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} ({location})")]
pub struct Error {
    pub kind: ErrorKind,
    pub location: Location,
}

impl Error {
    pub fn new(kind: ErrorKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}
