//! A source-preserving parser for the JSON family of configuration
//! formats: strict JSON, JSON-with-comments (JSONC), and JSON5.
//!
//! # Overview
//!
//! Most JSON crates decode straight to a native value and throw the
//! source text away. That is fine for config loading, but it loses
//! everything a linter, formatter, language server, or patching tool
//! needs: where a value sat in the file, what its original spelling was,
//! which comments surrounded it. This crate keeps all of that by
//! producing a fully typed, location-annotated Abstract Syntax Tree
//! alongside the token stream that produced it, with a one-shot
//! convenience for callers who only want the decoded value.
//!
//! # Design
//!
//! The front-end pipeline is the conventional four stages of a
//! hand-written recursive-descent parser:
//!
//! 1. [`reader`] — a character-level cursor over the source tracking
//!    line/column/offset and normalizing `\r`, `\n`, `\r\n`.
//! 2. [`lexer`] — turns characters into a typed [`token::Token`] stream,
//!    carrying every dialect-specific rule (Unicode identifiers, hex
//!    numbers, signed `Infinity`/`NaN`, string line continuations).
//! 3. [`parser`] — recursive descent over the token stream, building the
//!    [`ast::Document`] and enforcing structural invariants.
//! 4. [`printer`] — re-emits an AST as text, optionally indented.
//!
//! [`evaluate`] and [`visit`] are thin collaborators built on top of the
//! parser's public types: the former projects an AST to a plain
//! [`evaluate::Value`], the latter is a depth-first walk driven by a
//! fixed children-key map.
//!
//! # Example
//!
//! ```
//! use jsonfam::{parse, ParseOptions, Dialect};
//!
//! let doc = parse(
//!     r#"{ "name": "ferris", "legs": 4, "shiny": true }"#,
//!     ParseOptions { mode: Dialect::Json, ..Default::default() },
//! )
//! .unwrap();
//!
//! let value = jsonfam::evaluate(&doc).unwrap();
//! match value {
//!     jsonfam::Value::Object(members) => assert_eq!(members.len(), 3),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Parsing JSON5 with comments and trailing commas looks the same, only
//! the dialect changes:
//!
//! ```
//! use jsonfam::{parse, ParseOptions, Dialect};
//!
//! let doc = parse(
//!     "{ name: 'ferris', legs: 4, /* shiny */ }",
//!     ParseOptions { mode: Dialect::Json5, ..Default::default() },
//! )
//! .unwrap();
//! let printed = jsonfam::print(&doc.body, jsonfam::PrintOptions { indent: 2 });
//! assert!(printed.starts_with('{'));
//! ```
//!
//! # License
//! jsonfam is provided under the MIT OR Apache-2.0 license.

mod ast;
mod error;
mod escape;
mod evaluate;
mod lexer;
mod parser;
mod position;
mod printer;
mod reader;
mod token;
mod unicode;
mod visit;

pub use ast::{
    Array, Boolean, Document, Element, Identifier, Infinity, Member, MemberName, NaN, Null, Number, Object,
    StringNode, ValueNode,
};
pub use error::{Error, ErrorKind};
pub use evaluate::{evaluate, evaluate_node, Evaluate, Value};
pub use lexer::{tokenize, LexOptions};
pub use parser::{parse, ParseOptions};
pub use position::{Dialect, Location, LocationRange, Range, Sign};
pub use printer::{print, PrintOptions};
pub use token::{Token, TokenKind};
pub use visit::{iterator, traverse, visitor_keys, NodeIter, NodeRef, Visitor};
