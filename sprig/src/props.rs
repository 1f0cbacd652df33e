//! Prop maps - insertion-ordered name/value pairs on a node.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::host::{Host, Listener};
use crate::node::Child;
use crate::stem::Stem;

/// A prop value.
///
/// `Listener` and `Children` never serialize and never become attributes;
/// listeners register on the host element, `Children` carries the
/// descendants a component injects under `desc` before producing its
/// subtree.
pub enum PropValue<H: Host> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Stem),
    Style(StyleValue),
    Listener(Listener<H>),
    Children(Vec<Child<H>>),
}

impl<H: Host> PropValue<H> {
    /// Wrap an event handler closure.
    pub fn listener(f: impl Fn(&H::Element, &H::Event) + 'static) -> Self {
        PropValue::Listener(Rc::new(f))
    }
}

impl<H: Host> Clone for PropValue<H> {
    fn clone(&self) -> Self {
        match self {
            PropValue::Null => PropValue::Null,
            PropValue::Bool(b) => PropValue::Bool(*b),
            PropValue::Int(n) => PropValue::Int(*n),
            PropValue::Float(n) => PropValue::Float(*n),
            PropValue::Str(s) => PropValue::Str(s.clone()),
            PropValue::Style(s) => PropValue::Style(s.clone()),
            PropValue::Listener(l) => PropValue::Listener(Rc::clone(l)),
            PropValue::Children(c) => PropValue::Children(c.clone()),
        }
    }
}

impl<H: Host> fmt::Debug for PropValue<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => f.write_str("Null"),
            PropValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            PropValue::Int(n) => f.debug_tuple("Int").field(n).finish(),
            PropValue::Float(n) => f.debug_tuple("Float").field(n).finish(),
            PropValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            PropValue::Style(s) => f.debug_tuple("Style").field(s).finish(),
            PropValue::Listener(_) => f.write_str("Listener(..)"),
            PropValue::Children(c) => f.debug_tuple("Children").field(&c.len()).finish(),
        }
    }
}

impl<H: Host> From<&str> for PropValue<H> {
    fn from(s: &str) -> Self {
        PropValue::Str(s.into())
    }
}

impl<H: Host> From<String> for PropValue<H> {
    fn from(s: String) -> Self {
        PropValue::Str(s.into())
    }
}

impl<H: Host> From<Stem> for PropValue<H> {
    fn from(s: Stem) -> Self {
        PropValue::Str(s)
    }
}

impl<H: Host> From<bool> for PropValue<H> {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl<H: Host> From<i64> for PropValue<H> {
    fn from(n: i64) -> Self {
        PropValue::Int(n)
    }
}

impl<H: Host> From<i32> for PropValue<H> {
    fn from(n: i32) -> Self {
        PropValue::Int(n.into())
    }
}

impl<H: Host> From<f64> for PropValue<H> {
    fn from(n: f64) -> Self {
        PropValue::Float(n)
    }
}

impl<H: Host> From<StyleValue> for PropValue<H> {
    fn from(s: StyleValue) -> Self {
        PropValue::Style(s)
    }
}

/// A `style` prop: either a raw attribute string or a property map applied
/// key-by-key.
#[derive(Clone, Debug)]
pub enum StyleValue {
    Raw(Stem),
    Map(IndexMap<Stem, Stem>),
}

impl StyleValue {
    /// Build a property map from `(name, value)` pairs.
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Stem>,
        V: Into<Stem>,
    {
        StyleValue::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Raw(s.into())
    }
}

/// Ordered prop map. Insertion order is preserved, which keeps
/// serialization deterministic.
pub struct Props<H: Host> {
    entries: IndexMap<Stem, PropValue<H>>,
}

impl<H: Host> Props<H> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Chainable insert, for building prop maps inline.
    pub fn with(mut self, name: impl Into<Stem>, value: impl Into<PropValue<H>>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropValue<H>> {
        self.entries.get(name)
    }

    /// Insert or overwrite a prop in place.
    pub fn set(&mut self, name: impl Into<Stem>, value: impl Into<PropValue<H>>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Shallow-merge `patch` into this map, overwriting only the keys it
    /// carries.
    pub fn merge(&mut self, patch: Props<H>) {
        for (name, value) in patch.entries {
            self.entries.insert(name, value);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over all props in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Stem, &PropValue<H>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: Host> Default for Props<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Clone for Props<H> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<H: Host> fmt::Debug for Props<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<H: Host> From<()> for Props<H> {
    fn from(_: ()) -> Self {
        Props::new()
    }
}

impl<H: Host, K, V> From<Vec<(K, V)>> for Props<H>
where
    K: Into<Stem>,
    V: Into<PropValue<H>>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        let mut props = Props::new();
        for (k, v) in pairs {
            props.set(k, v);
        }
        props
    }
}
