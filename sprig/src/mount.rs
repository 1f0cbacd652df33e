//! Mounting - materializing a tree into host nodes and attaching them.
//!
//! Four attachment operations exist on every node: append, prepend,
//! insert-adjacent, replace. Mounting recurses depth-first: a component
//! expands into its subtree and delegates, an element creates one host node
//! and mounts children into it, a fragment splices its children straight
//! into the parent context.

use crate::component::Lifecycle;
use crate::content::Content;
use crate::error::Error;
use crate::host::{Host, InsertPosition};
use crate::node::{Child, Node, NodeType, Template};
use crate::props::{PropValue, Props, StyleValue};
use crate::stem::Stem;
use crate::{debug, trace};

/// How a materialized element gets attached to its anchor.
enum Attach<'a, H: Host> {
    Append(&'a H::Element),
    Prepend(&'a H::Element),
    InsertAt(&'a H::Element, InsertPosition),
    Replace(&'a H::Element),
}

impl<H: Host> Node<H> {
    /// Mount this node as the last child of `anchor`.
    pub fn append_to(&self, doc: &H, anchor: &H::Element) -> Result<H::Element, Error> {
        self.mount(doc, Attach::Append(anchor))
    }

    /// Mount this node as the first child of `anchor`.
    pub fn prepend_to(&self, doc: &H, anchor: &H::Element) -> Result<H::Element, Error> {
        self.mount(doc, Attach::Prepend(anchor))
    }

    /// Mount this node relative to `anchor` at `position`.
    pub fn insert_at(
        &self,
        doc: &H,
        anchor: &H::Element,
        position: InsertPosition,
    ) -> Result<H::Element, Error> {
        self.mount(doc, Attach::InsertAt(anchor, position))
    }

    /// Mount this node in place of `anchor`.
    ///
    /// Fails for fragments: a group of zero-or-many host nodes cannot
    /// coherently replace a single one.
    pub fn replace(&self, doc: &H, anchor: &H::Element) -> Result<H::Element, Error> {
        self.mount(doc, Attach::Replace(anchor))
    }

    /// Re-render a mounted component in place.
    ///
    /// Fails with [`Error::NotRooted`] before the first mount. Otherwise
    /// notifies `will_destroy`, shallow-merges `patch` into the props, and
    /// replaces the previously recorded host node with a freshly produced
    /// one. Returns the same handle for chaining.
    pub fn re(&self, doc: &H, patch: Props<H>) -> Result<Node<H>, Error> {
        let root = self.root().ok_or(Error::NotRooted)?;
        debug!("re-rendering {:?}", self.node_type());
        self.with_hooks(|hooks| hooks.will_destroy());
        self.inner.borrow_mut().props.merge(patch);
        self.replace(doc, &root)?;
        Ok(self.clone())
    }

    fn mount(&self, doc: &H, attach: Attach<'_, H>) -> Result<H::Element, Error> {
        match self.node_type() {
            NodeType::Elem => self.mount_elem(doc, attach),
            NodeType::Frag => self.mount_frag(doc, attach),
            NodeType::Comp => self.mount_comp(doc, attach),
        }
    }

    // ========================================================================
    // Elem
    // ========================================================================

    fn mount_elem(&self, doc: &H, attach: Attach<'_, H>) -> Result<H::Element, Error> {
        let node = self.materialize(doc)?;
        match attach {
            Attach::Append(anchor) => doc.append_element(anchor, &node),
            Attach::Prepend(anchor) => doc.prepend_element(anchor, &node),
            Attach::InsertAt(anchor, position) => doc.insert_adjacent(anchor, position, &node),
            Attach::Replace(anchor) => doc.replace_element(anchor, &node),
        }
        self.set_root(node.clone());
        Ok(node)
    }

    /// Create a fresh host node for this element and mount every child into
    /// it. Each call materializes from scratch.
    fn materialize(&self, doc: &H) -> Result<H::Element, Error> {
        let (tag, props, children) = {
            let inner = self.inner.borrow();
            let tag = match &inner.template {
                Template::Tag(tag) => tag.clone(),
                _ => unreachable!("materialize is only reached for element nodes"),
            };
            (tag, inner.props.clone(), inner.children.clone())
        };
        trace!("materializing <{tag}> with {} children", children.len());

        let node = doc.create_element(&tag);
        apply_props(doc, &node, &props);

        for child in &children {
            match child {
                Child::Node(n) => {
                    n.append_to(doc, &node)?;
                }
                Child::Content(c) => append_content(doc, &node, c),
            }
        }
        Ok(node)
    }

    // ========================================================================
    // Frag
    // ========================================================================

    fn mount_frag(&self, doc: &H, attach: Attach<'_, H>) -> Result<H::Element, Error> {
        let children = self.children();
        match attach {
            Attach::Replace(_) => Err(Error::ReplaceWithFragment),
            Attach::Append(anchor) => {
                for child in &children {
                    match child {
                        Child::Node(n) => {
                            n.append_to(doc, anchor)?;
                        }
                        Child::Content(c) => append_content(doc, anchor, c),
                    }
                }
                Ok(anchor.clone())
            }
            Attach::Prepend(anchor) => self.splice_front(doc, anchor, None, &children),
            Attach::InsertAt(anchor, position) => {
                self.splice_front(doc, anchor, Some(position), &children)
            }
        }
    }

    /// Front-insertion splicing: establish an anchor point with the first
    /// node child (prepended, or inserted at the requested position), then
    /// land every later node child right after the previous child's host
    /// node so final order matches children order. Content leaves are
    /// appended unconditionally; their order relative to interleaved node
    /// children is not preserved.
    fn splice_front(
        &self,
        doc: &H,
        anchor: &H::Element,
        position: Option<InsertPosition>,
        children: &[Child<H>],
    ) -> Result<H::Element, Error> {
        let mut previous: Option<H::Element> = None;
        for child in children {
            match child {
                Child::Content(c) => append_content(doc, anchor, c),
                Child::Node(n) => {
                    let element = match &previous {
                        Some(prev) => n.insert_at(doc, prev, InsertPosition::AfterEnd)?,
                        None => match position {
                            Some(position) => n.insert_at(doc, anchor, position)?,
                            None => n.prepend_to(doc, anchor)?,
                        },
                    };
                    previous = Some(element);
                }
            }
        }
        Ok(anchor.clone())
    }

    // ========================================================================
    // Comp
    // ========================================================================

    fn mount_comp(&self, doc: &H, attach: Attach<'_, H>) -> Result<H::Element, Error> {
        self.with_hooks(|hooks| hooks.will_render());
        let subtree = self.expand()?;
        let node = subtree.mount(doc, attach)?;
        self.set_root(node.clone());
        self.with_hooks(|hooks| hooks.has_rendered());
        Ok(node)
    }

    /// Expand a component into its concrete subtree: inject the current
    /// children under `desc`, invoke the template, and stamp the produced
    /// subtree's back-reference to this component. Runs fresh on every
    /// mount and re-render. Non-component nodes expand to themselves.
    pub(crate) fn expand(&self) -> Result<Node<H>, Error> {
        let template = self.inner.borrow().template.clone();
        let subtree = match template {
            Template::Render(render) => {
                let props = self.inject_desc();
                render(&props, self)
            }
            Template::Component(component) => {
                let props = self.inject_desc();
                component.produce(&props, self)?
            }
            _ => return Ok(self.clone()),
        };
        subtree.set_original(self);
        Ok(subtree)
    }

    /// Make the current children reachable from the template via
    /// `props["desc"]`, returning the prop snapshot handed to it.
    fn inject_desc(&self) -> Props<H> {
        let mut inner = self.inner.borrow_mut();
        let desc = inner.children.clone();
        inner.props.set("desc", PropValue::Children(desc));
        inner.props.clone()
    }

    /// Run `f` against the lifecycle capability, when the template exposes
    /// one. Render-function components have no hooks.
    fn with_hooks(&self, f: impl FnOnce(&dyn Lifecycle)) {
        let component = match &self.inner.borrow().template {
            Template::Component(component) => component.clone(),
            _ => return,
        };
        if let Some(hooks) = component.hooks() {
            f(hooks);
        }
    }
}

fn append_content<H: Host>(doc: &H, parent: &H::Element, content: &Content<H>) {
    match content.as_raw() {
        Some(element) => doc.append_element(parent, element),
        None => doc.append_text(parent, &content.render_text()),
    }
}

/// Apply props to a freshly created host element, in priority order:
/// event-prefixed names register listeners, null values are skipped, `style`
/// applies raw or key-by-key, then aliasing plus the boolean
/// live-property/attribute split for everything else.
fn apply_props<H: Host>(doc: &H, node: &H::Element, props: &Props<H>) {
    for (name, value) in props.iter() {
        if let Some(event) = name.strip_prefix("on") {
            if let PropValue::Listener(listener) = value {
                doc.add_event_listener(node, event, listener.clone());
                continue;
            }
        }
        match value {
            PropValue::Null => {}
            // Never attributes: listeners were handled above, `desc` is
            // internal plumbing for component expansion.
            PropValue::Listener(_) | PropValue::Children(_) => {}
            PropValue::Style(style) if *name == "style" => match style {
                StyleValue::Raw(s) => doc.set_attribute(node, "style", s),
                StyleValue::Map(map) => {
                    for (prop, val) in map {
                        doc.set_style_property(node, prop, val);
                    }
                }
            },
            PropValue::Str(s) if *name == "style" => doc.set_attribute(node, "style", s),
            PropValue::Bool(b) => {
                let name = alias(name);
                if name.contains('-') {
                    doc.set_attribute(node, name, if *b { "true" } else { "false" });
                } else {
                    doc.set_bool_property(node, name, *b);
                }
            }
            PropValue::Int(n) => {
                doc.set_attribute(node, alias(name), &compact_str::format_compact!("{n}"));
            }
            PropValue::Float(n) => {
                doc.set_attribute(node, alias(name), &compact_str::format_compact!("{n}"));
            }
            PropValue::Str(s) => doc.set_attribute(node, alias(name), s),
            PropValue::Style(StyleValue::Raw(s)) => doc.set_attribute(node, alias(name), s),
            PropValue::Style(StyleValue::Map(_)) => {}
        }
    }
}

/// Canonical attribute aliases, applied at materialization time.
fn alias(name: &Stem) -> &str {
    match name.as_str() {
        "cl" => "class",
        "htmlFor" => "for",
        name => name,
    }
}
