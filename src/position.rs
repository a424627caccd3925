//! Source locations, spans and the small value types shared across the
//! lexer, parser and printer (dialect selection, literal signs).

use std::fmt::{self, Display, Formatter};

/// A 1-based line/column, 0-based UTF-16 code unit offset into the source.
///
/// `offset` is counted in UTF-16 code units rather than bytes so that
/// locations stay directly usable by editor tooling (e.g. LSP ranges)
/// that indexes text the same way. See DESIGN.md for the rationale.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Location {
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    pub const fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of source text, `end` exclusive.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct LocationRange {
    pub start: Location,
    pub end: Location,
}

impl LocationRange {
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, other: &LocationRange) -> bool {
        self.start.offset <= other.start.offset && self.end.offset >= other.end.offset
    }
}

/// A `(start_offset, end_offset)` convenience pair, attached to tokens
/// and nodes only when the caller asked for `ranges`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    pub fn from_loc(loc: &LocationRange) -> Self {
        Self {
            start: loc.start.offset,
            end: loc.end.offset,
        }
    }
}

/// Which grammar a call to `tokenize`/`parse` should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Json,
    Jsonc,
    Json5,
}

impl Dialect {
    pub fn allows_comments(self) -> bool {
        matches!(self, Dialect::Jsonc | Dialect::Json5)
    }

    pub fn is_json5(self) -> bool {
        matches!(self, Dialect::Json5)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Json
    }
}

/// The optional sign carried by a JSON5 `NaN`/`Infinity` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    None,
    Plus,
    Minus,
}

impl Sign {
    /// Split a leading `+`/`-` off `text`, the way lexed `Number` token
    /// text carries its own sign rather than a separate field.
    pub fn split(text: &str) -> (Sign, &str) {
        match text.as_bytes().first() {
            Some(b'+') => (Sign::Plus, &text[1..]),
            Some(b'-') => (Sign::Minus, &text[1..]),
            _ => (Sign::None, text),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sign::None => "",
            Sign::Plus => "+",
            Sign::Minus => "-",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Sign::None | Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
