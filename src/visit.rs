//! Component J: a depth-first walk over the AST driven by a fixed
//! children-key map, in the spirit of the teacher's own tree-search
//! helpers over `ASTNode` but rewritten against this crate's typed
//! variants instead of a generic node wrapper.

use crate::ast::{Array, Document, Element, Member, Object, ValueNode};
use crate::position::LocationRange;

/// A borrowed reference to any node reachable from a `Document`.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Document(&'a Document),
    Value(&'a ValueNode),
    Member(&'a Member),
    Element(&'a Element),
}

impl<'a> NodeRef<'a> {
    pub fn loc(&self) -> LocationRange {
        match self {
            NodeRef::Document(doc) => doc.loc,
            NodeRef::Value(v) => v.loc(),
            NodeRef::Member(m) => m.loc,
            NodeRef::Element(e) => e.loc,
        }
    }
}

/// Per-kind ordered list of child-bearing fields, mirroring the table in
/// the data model: `Document -> [body]`, `Object -> [members]`, `Member
/// -> [name, value]`, `Array -> [elements]`, `Element -> [value]`, every
/// leaf -> `[]`.
pub fn visitor_keys(node: &NodeRef) -> &'static [&'static str] {
    match node {
        NodeRef::Document(_) => &["body"],
        NodeRef::Value(ValueNode::Object(_)) => &["members"],
        NodeRef::Value(ValueNode::Array(_)) => &["elements"],
        NodeRef::Value(_) => &[],
        NodeRef::Member(_) => &["name", "value"],
        NodeRef::Element(_) => &["value"],
    }
}

pub trait Visitor {
    fn enter(&mut self, node: NodeRef);
    fn exit(&mut self, node: NodeRef);
}

fn children<'a>(node: NodeRef<'a>) -> Vec<NodeRef<'a>> {
    match node {
        NodeRef::Document(doc) => vec![NodeRef::Value(&doc.body)],
        NodeRef::Value(ValueNode::Object(Object { members, .. })) => {
            members.iter().map(NodeRef::Member).collect()
        }
        NodeRef::Value(ValueNode::Array(Array { elements, .. })) => {
            elements.iter().map(NodeRef::Element).collect()
        }
        NodeRef::Value(_) => vec![],
        // The name half of a member is a leaf (a decoded string or
        // identifier); only its value is a node worth descending into.
        NodeRef::Member(m) => vec![NodeRef::Value(&m.value)],
        NodeRef::Element(e) => vec![NodeRef::Value(&e.value)],
    }
}

/// Walk `doc` depth-first, calling `visitor.enter` before descending into
/// a node's children (in `visitor_keys` order) and `visitor.exit` after.
pub fn traverse(doc: &Document, visitor: &mut dyn Visitor) {
    fn walk(node: NodeRef, visitor: &mut dyn Visitor) {
        visitor.enter(node);
        for child in children(node) {
            walk(child, visitor);
        }
        visitor.exit(node);
    }
    walk(NodeRef::Document(doc), visitor);
}

/// Lazily yield the same pre-order sequence `traverse` visits on enter,
/// built on an explicit stack so it cannot recurse into the call stack
/// regardless of how deep the tree is.
pub struct NodeIter<'a> {
    stack: Vec<NodeRef<'a>>,
}

pub fn iterator(doc: &Document) -> NodeIter<'_> {
    NodeIter {
        stack: vec![NodeRef::Document(doc)],
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mut kids = children(node);
        kids.reverse();
        self.stack.extend(kids);
        Some(node)
    }
}
