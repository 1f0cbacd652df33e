//! Tree nodes - the closed variant set over elements, components, and
//! fragments, plus children normalization and the factory dispatcher.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::component::Component;
use crate::content::{Content, Value};
use crate::error::Error;
use crate::host::Host;
use crate::props::{PropValue, Props};
use crate::stem::Stem;
use crate::trace;

/// What a node was built from.
///
/// Template kinds are declared by the caller; there is no runtime
/// introspection of function shapes. `ElemClass` exists only so the factory
/// can reject registrations that claim to extend the intrinsic element
/// variant - it is never stored on a node.
pub enum Template<H: Host> {
    /// An intrinsic tag name.
    Tag(Stem),
    /// The fragment marker.
    Fragment,
    /// A declared extension of the intrinsic element variant. Rejected by
    /// [`Node::create`].
    ElemClass,
    /// A plain render function.
    Render(RenderFn<H>),
    /// A constructor-style component with lifecycle access.
    Component(Rc<dyn Component<H>>),
}

/// Render function: `(props, self) -> subtree`.
pub type RenderFn<H> = Rc<dyn Fn(&Props<H>, &Node<H>) -> Node<H>>;

impl<H: Host> Template<H> {
    /// Wrap a plain render function.
    pub fn render(f: impl Fn(&Props<H>, &Node<H>) -> Node<H> + 'static) -> Self {
        Template::Render(Rc::new(f))
    }

    /// Wrap a constructor-style component.
    pub fn component(c: impl Component<H> + 'static) -> Self {
        Template::Component(Rc::new(c))
    }
}

impl<H: Host> Clone for Template<H> {
    fn clone(&self) -> Self {
        match self {
            Template::Tag(t) => Template::Tag(t.clone()),
            Template::Fragment => Template::Fragment,
            Template::ElemClass => Template::ElemClass,
            Template::Render(f) => Template::Render(Rc::clone(f)),
            Template::Component(c) => Template::Component(Rc::clone(c)),
        }
    }
}

impl<H: Host> fmt::Debug for Template<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Tag(t) => f.debug_tuple("Tag").field(t).finish(),
            Template::Fragment => f.write_str("Fragment"),
            Template::ElemClass => f.write_str("ElemClass"),
            Template::Render(_) => f.write_str("Render(..)"),
            Template::Component(_) => f.write_str("Component(..)"),
        }
    }
}

/// The concrete node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Elem,
    Comp,
    Frag,
}

/// One entry in a node's child list: either another tree node or a content
/// leaf.
pub enum Child<H: Host> {
    Node(Node<H>),
    Content(Content<H>),
}

impl<H: Host> Child<H> {
    /// `"element"` for tree nodes, `"content"` for leaves.
    pub fn kind(&self) -> &'static str {
        match self {
            Child::Node(_) => "element",
            Child::Content(_) => "content",
        }
    }

    /// True for element and component nodes; false for fragments and
    /// content leaves.
    pub fn is_element(&self) -> bool {
        match self {
            Child::Node(n) => n.is_element(),
            Child::Content(_) => false,
        }
    }

    pub fn as_node(&self) -> Option<&Node<H>> {
        match self {
            Child::Node(n) => Some(n),
            Child::Content(_) => None,
        }
    }

    pub fn as_content(&self) -> Option<&Content<H>> {
        match self {
            Child::Content(c) => Some(c),
            Child::Node(_) => None,
        }
    }
}

impl<H: Host> Clone for Child<H> {
    fn clone(&self) -> Self {
        match self {
            Child::Node(n) => Child::Node(n.clone()),
            Child::Content(c) => Child::Content(c.clone()),
        }
    }
}

impl<H: Host> fmt::Debug for Child<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Node(n) => n.fmt(f),
            Child::Content(c) => c.fmt(f),
        }
    }
}

pub(crate) struct Inner<H: Host> {
    pub(crate) template: Template<H>,
    pub(crate) props: Props<H>,
    pub(crate) children: Vec<Child<H>>,
    pub(crate) parent: Option<Weak<RefCell<Inner<H>>>>,
    pub(crate) original: Option<Weak<RefCell<Inner<H>>>>,
    pub(crate) root: Option<H::Element>,
}

/// A tree node: an intrinsic element, a component invocation, or a flat
/// fragment.
///
/// `Node` is a cheap-clone handle; clones refer to the same node. All
/// mutation goes through methods so the children normalization rule cannot
/// be bypassed.
pub struct Node<H: Host> {
    pub(crate) inner: Rc<RefCell<Inner<H>>>,
}

impl<H: Host> Clone for Node<H> {
    fn clone(&self) -> Self {
        Node {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: Host> Node<H> {
    fn from_parts(
        template: Template<H>,
        props: Props<H>,
        desc: impl IntoIterator<Item = Value<H>>,
    ) -> Self {
        let node = Node {
            inner: Rc::new(RefCell::new(Inner {
                template,
                props,
                children: Vec::new(),
                parent: None,
                original: None,
                root: None,
            })),
        };
        node.append(desc);
        node
    }

    /// Build an intrinsic element node.
    pub fn elem(
        tag: impl Into<Stem>,
        props: impl Into<Props<H>>,
        desc: impl IntoIterator<Item = Value<H>>,
    ) -> Self {
        Self::from_parts(Template::Tag(tag.into()), props.into(), desc)
    }

    /// Build a fragment node.
    pub fn frag(desc: impl IntoIterator<Item = Value<H>>) -> Self {
        Self::from_parts(Template::Fragment, Props::new(), desc)
    }

    /// Build a component node from a plain render function.
    pub fn comp(
        render: impl Fn(&Props<H>, &Node<H>) -> Node<H> + 'static,
        props: impl Into<Props<H>>,
        desc: impl IntoIterator<Item = Value<H>>,
    ) -> Self {
        Self::from_parts(Template::render(render), props.into(), desc)
    }

    /// Build a component node from a constructor-style component.
    pub fn component(
        component: impl Component<H> + 'static,
        props: impl Into<Props<H>>,
        desc: impl IntoIterator<Item = Value<H>>,
    ) -> Self {
        Self::from_parts(Template::component(component), props.into(), desc)
    }

    /// Factory dispatch: instantiate the node kind matching the template.
    ///
    /// Fragments ignore props entirely. A template declaring an extension
    /// of the intrinsic element variant is rejected.
    pub fn create(
        template: Template<H>,
        props: impl Into<Props<H>>,
        desc: impl IntoIterator<Item = Value<H>>,
    ) -> Result<Self, Error> {
        match template {
            Template::ElemClass => Err(Error::ElemNotExtendable),
            Template::Fragment => Ok(Self::frag(desc)),
            template => Ok(Self::from_parts(template, props.into(), desc)),
        }
    }

    /// Constant `"element"` - every tree node kind, as opposed to content
    /// leaves.
    pub fn kind(&self) -> &'static str {
        "element"
    }

    /// The concrete variant of this node.
    pub fn node_type(&self) -> NodeType {
        match &self.inner.borrow().template {
            Template::Tag(_) => NodeType::Elem,
            Template::Fragment => NodeType::Frag,
            Template::Render(_) | Template::Component(_) => NodeType::Comp,
            // Rejected by `create`, never stored.
            Template::ElemClass => NodeType::Elem,
        }
    }

    /// True for element and component nodes. Fragments are excluded: they
    /// are groupings, not renderable elements in their own right.
    pub fn is_element(&self) -> bool {
        matches!(self.node_type(), NodeType::Elem | NodeType::Comp)
    }

    /// The template this node was built from.
    pub fn template(&self) -> Template<H> {
        self.inner.borrow().template.clone()
    }

    /// The tag name, for element nodes.
    pub fn tag(&self) -> Option<Stem> {
        match &self.inner.borrow().template {
            Template::Tag(t) => Some(t.clone()),
            _ => None,
        }
    }

    /// Type-narrowing check against the stored tag template.
    pub fn is_tag(&self, name: &str) -> bool {
        matches!(&self.inner.borrow().template, Template::Tag(t) if *t == name)
    }

    /// Snapshot of the current prop map.
    pub fn props(&self) -> Props<H> {
        self.inner.borrow().props.clone()
    }

    /// Overwrite a single prop in place.
    pub fn set_prop(&self, name: impl Into<Stem>, value: impl Into<PropValue<H>>) {
        self.inner.borrow_mut().props.set(name, value);
    }

    /// Snapshot of the current child list.
    pub fn children(&self) -> Vec<Child<H>> {
        self.inner.borrow().children.clone()
    }

    /// Replace the child list, re-running normalization.
    pub fn set_children(&self, desc: impl IntoIterator<Item = Value<H>>) {
        self.inner.borrow_mut().children.clear();
        self.append(desc);
    }

    /// Extend the child list.
    ///
    /// Normalization: nested lists flatten to a single flat sequence,
    /// `None` and `false` are dropped, `0` and other falsy-but-defined
    /// values are kept, raw values wrap into content leaves, and existing
    /// nodes/leaves pass through. Node children get their parent
    /// back-reference stamped here.
    pub fn append(&self, values: impl IntoIterator<Item = Value<H>>) {
        for value in values {
            self.append_value(value);
        }
    }

    fn append_value(&self, value: Value<H>) {
        match value {
            Value::List(values) => {
                for value in values {
                    self.append_value(value);
                }
            }
            Value::None | Value::Bool(false) => {}
            Value::Bool(true) => self.push_child(Child::Content(Content::Bool(true))),
            Value::Int(n) => self.push_child(Child::Content(Content::Int(n))),
            Value::Float(n) => self.push_child(Child::Content(Content::Float(n))),
            Value::Str(s) => self.push_child(Child::Content(Content::Text(s))),
            Value::Content(c) => self.push_child(Child::Content(c)),
            Value::Node(n) => {
                n.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
                self.push_child(Child::Node(n));
            }
        }
    }

    fn push_child(&self, child: Child<H>) {
        self.inner.borrow_mut().children.push(child);
    }

    /// The owning node, if this node has been adopted as a child.
    pub fn parent(&self) -> Option<Node<H>> {
        let inner = self.inner.borrow();
        inner
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Node { inner })
    }

    /// The component this subtree was produced from, if any.
    pub fn original(&self) -> Option<Node<H>> {
        let inner = self.inner.borrow();
        inner
            .original
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Node { inner })
    }

    pub(crate) fn set_original(&self, comp: &Node<H>) {
        self.inner.borrow_mut().original = Some(Rc::downgrade(&comp.inner));
    }

    /// The host element this node last materialized, if ever mounted.
    pub fn root(&self) -> Option<H::Element> {
        self.inner.borrow().root.clone()
    }

    pub(crate) fn set_root(&self, element: H::Element) {
        trace!("recording root for {:?}", self.node_type());
        self.inner.borrow_mut().root = Some(element);
    }

    /// Whether two handles refer to the same node.
    pub fn ptr_eq(&self, other: &Node<H>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<H: Host> fmt::Debug for Node<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        let mut s = f.debug_struct("Node");
        match &inner.template {
            Template::Tag(t) => s.field("type", &NodeType::Elem).field("tag", t),
            Template::Fragment => s.field("type", &NodeType::Frag),
            _ => s.field("type", &NodeType::Comp),
        }
        .field("children", &inner.children.len())
        .finish()
    }
}
