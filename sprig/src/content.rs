//! Content leaves - non-node values rendered as-is.

use std::fmt;

use crate::host::Host;
use crate::node::{Child, Node};
use crate::stem::Stem;

/// A non-node value wrapped as a renderable leaf.
///
/// Leaves report `kind = "content"`, as opposed to tree nodes which are all
/// `"element"`. A [`Content::Raw`] leaf adopts a foreign host element into
/// the tree; it mounts by attaching that element directly and contributes
/// nothing to serialized output.
pub enum Content<H: Host> {
    Text(Stem),
    Int(i64),
    Float(f64),
    Bool(bool),
    Raw(H::Element),
}

impl<H: Host> Content<H> {
    /// Constant `"content"` - distinguishes leaves from tree nodes.
    pub fn kind(&self) -> &'static str {
        "content"
    }

    /// The adopted host element, if this is a raw leaf.
    pub fn as_raw(&self) -> Option<&H::Element> {
        match self {
            Content::Raw(el) => Some(el),
            _ => None,
        }
    }

    /// String form used for text mounting and serialization.
    ///
    /// Raw leaves have no text form; they attach their host element instead.
    pub fn render_text(&self) -> Stem {
        match self {
            Content::Text(s) => s.clone(),
            Content::Int(n) => compact_str::format_compact!("{n}").into(),
            Content::Float(n) => compact_str::format_compact!("{n}").into(),
            Content::Bool(b) => Stem::from(if *b { "true" } else { "false" }),
            Content::Raw(_) => Stem::new(),
        }
    }
}

impl<H: Host> Clone for Content<H> {
    fn clone(&self) -> Self {
        match self {
            Content::Text(s) => Content::Text(s.clone()),
            Content::Int(n) => Content::Int(*n),
            Content::Float(n) => Content::Float(*n),
            Content::Bool(b) => Content::Bool(*b),
            Content::Raw(el) => Content::Raw(el.clone()),
        }
    }
}

impl<H: Host> fmt::Debug for Content<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Content::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Content::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Content::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Content::Raw(_) => f.write_str("Raw(..)"),
        }
    }
}

/// Loosely-typed input to children normalization.
///
/// Mirrors what callers can hand a tree: nested lists flatten, `None` and
/// `false` drop, raw values wrap into [`Content`] leaves, and existing
/// nodes/leaves pass through untouched. `0` and other falsy-but-defined
/// values are kept.
pub enum Value<H: Host> {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Stem),
    Node(Node<H>),
    Content(Content<H>),
    List(Vec<Value<H>>),
}

impl<H: Host> Value<H> {
    /// Adopt a foreign host element as a child value.
    pub fn raw(element: H::Element) -> Self {
        Value::Content(Content::Raw(element))
    }
}

impl<H: Host> fmt::Debug for Value<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Node(n) => n.fmt(f),
            Value::Content(c) => c.fmt(f),
            Value::List(l) => f.debug_list().entries(l).finish(),
        }
    }
}

impl<H: Host> From<&str> for Value<H> {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl<H: Host> From<String> for Value<H> {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl<H: Host> From<Stem> for Value<H> {
    fn from(s: Stem) -> Self {
        Value::Str(s)
    }
}

impl<H: Host> From<i64> for Value<H> {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl<H: Host> From<i32> for Value<H> {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl<H: Host> From<f64> for Value<H> {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl<H: Host> From<bool> for Value<H> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<H: Host> From<Node<H>> for Value<H> {
    fn from(node: Node<H>) -> Self {
        Value::Node(node)
    }
}

impl<H: Host> From<Content<H>> for Value<H> {
    fn from(content: Content<H>) -> Self {
        Value::Content(content)
    }
}

impl<H: Host> From<Child<H>> for Value<H> {
    fn from(child: Child<H>) -> Self {
        match child {
            Child::Node(n) => Value::Node(n),
            Child::Content(c) => Value::Content(c),
        }
    }
}

impl<H: Host, V: Into<Value<H>>> From<Option<V>> for Value<H> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::None,
        }
    }
}

impl<H: Host, V: Into<Value<H>>> From<Vec<V>> for Value<H> {
    fn from(values: Vec<V>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}
