//! Component I: project a parsed AST into plain Rust values.
//!
//! This is a thin collaborator built on top of the parser's public
//! types, not a subsystem in its own right — it exists so callers who
//! just want "the data" don't have to walk `ValueNode` by hand.

use crate::ast::{Document, Element, Member, ValueNode};
use crate::error::{Error, ErrorKind};

/// The plain-value projection of an AST. Object member order is
/// preserved (a `Vec` of pairs, not a map) because the AST itself never
/// deduplicates members; folding duplicates into "last write wins" is a
/// caller concern, not `evaluate`'s.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Object(Vec<(String, Value)>),
    Array(Vec<Value>),
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// Evaluate a parsed document's body.
pub fn evaluate(doc: &Document) -> Result<Value, Error> {
    evaluate_node(&doc.body)
}

/// Evaluate a single value node. JSON5 `Identifier` nodes evaluate to
/// their name as a `String`; `NaN`/`Infinity` evaluate to the
/// corresponding signed `f64`.
pub fn evaluate_node(node: &ValueNode) -> Result<Value, Error> {
    Ok(match node {
        ValueNode::Object(o) => {
            let mut members = Vec::with_capacity(o.members.len());
            for member in &o.members {
                members.push((member.name.as_str().to_string(), evaluate_node(&member.value)?));
            }
            Value::Object(members)
        }
        ValueNode::Array(a) => {
            let mut elements = Vec::with_capacity(a.elements.len());
            for element in &a.elements {
                elements.push(evaluate_node(&element.value)?);
            }
            Value::Array(elements)
        }
        ValueNode::String(s) => Value::String(s.value.clone()),
        ValueNode::Number(n) => Value::Number(n.value),
        ValueNode::Boolean(b) => Value::Boolean(b.value),
        ValueNode::Null(_) => Value::Null,
        ValueNode::Identifier(id) => Value::String(id.name.clone()),
        ValueNode::NaN(n) => Value::Number(n.sign.multiplier() * f64::NAN),
        ValueNode::Infinity(n) => Value::Number(n.sign.multiplier() * f64::INFINITY),
    })
}

/// A node that `evaluate`/`evaluate_node` can be called on directly.
/// `ValueNode` evaluates normally; a bare `Element` or `Member` — which
/// `parse` never produces on its own, but a caller can build by hand —
/// raises `MisplacedContainerNode` instead of panicking.
pub trait Evaluate {
    fn evaluate(&self) -> Result<Value, Error>;
}

impl Evaluate for ValueNode {
    fn evaluate(&self) -> Result<Value, Error> {
        evaluate_node(self)
    }
}

impl Evaluate for Element {
    fn evaluate(&self) -> Result<Value, Error> {
        Err(Error::new(ErrorKind::MisplacedContainerNode, self.loc.start))
    }
}

impl Evaluate for Member {
    fn evaluate(&self) -> Result<Value, Error> {
        Err(Error::new(ErrorKind::MisplacedContainerNode, self.loc.start))
    }
}
