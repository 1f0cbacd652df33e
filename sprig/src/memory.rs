//! In-memory host document.
//!
//! A small self-contained [`Host`] implementation: enough of a document to
//! mount trees outside a browser - server-side rendering of mounted output,
//! integration tests, property checks. Elements are cheap-clone handles over
//! shared state, with parent links so adjacent insertion and replacement
//! work the same way they do on a real DOM.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::host::{Host, InsertPosition, Listener};
use crate::stem::Stem;

/// The in-memory document. Stateless by itself; all state lives in the
/// element nodes it creates.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryDocument;

impl MemoryDocument {
    pub fn new() -> Self {
        Self
    }

    /// Create a detached element to serve as a mount anchor.
    pub fn root(&self, tag: &str) -> MemoryElement {
        MemoryElement::new(tag)
    }
}

/// Event payload delivered to listeners registered on memory elements.
#[derive(Debug, Clone)]
pub struct MemoryEvent {
    pub name: Stem,
}

impl MemoryEvent {
    pub fn new(name: impl Into<Stem>) -> Self {
        Self { name: name.into() }
    }
}

/// DOM content - either an element or text.
#[derive(Clone)]
pub enum MemoryNode {
    Element(MemoryElement),
    Text(Stem),
}

impl MemoryNode {
    pub fn as_element(&self) -> Option<&MemoryElement> {
        match self {
            MemoryNode::Element(e) => Some(e),
            MemoryNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MemoryNode::Text(t) => Some(t),
            MemoryNode::Element(_) => None,
        }
    }
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryNode::Element(e) => e.fmt(f),
            MemoryNode::Text(t) => f.debug_tuple("Text").field(t).finish(),
        }
    }
}

struct ElementData {
    tag: Stem,
    attrs: IndexMap<Stem, Stem>,
    bool_props: IndexMap<Stem, bool>,
    styles: IndexMap<Stem, Stem>,
    listeners: Vec<(Stem, Listener<MemoryDocument>)>,
    children: Vec<MemoryNode>,
    parent: Option<Weak<RefCell<ElementData>>>,
}

/// Handle to one element in the memory document.
#[derive(Clone)]
pub struct MemoryElement {
    data: Rc<RefCell<ElementData>>,
}

impl MemoryElement {
    pub fn new(tag: impl Into<Stem>) -> Self {
        Self {
            data: Rc::new(RefCell::new(ElementData {
                tag: tag.into(),
                attrs: IndexMap::new(),
                bool_props: IndexMap::new(),
                styles: IndexMap::new(),
                listeners: Vec::new(),
                children: Vec::new(),
                parent: None,
            })),
        }
    }

    pub fn tag(&self) -> Stem {
        self.data.borrow().tag.clone()
    }

    pub fn attr(&self, name: &str) -> Option<Stem> {
        self.data.borrow().attrs.get(name).cloned()
    }

    pub fn bool_prop(&self, name: &str) -> Option<bool> {
        self.data.borrow().bool_props.get(name).copied()
    }

    pub fn style(&self, name: &str) -> Option<Stem> {
        self.data.borrow().styles.get(name).cloned()
    }

    pub fn children(&self) -> Vec<MemoryNode> {
        self.data.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.data.borrow().children.len()
    }

    /// The parent element, if attached.
    pub fn parent(&self) -> Option<MemoryElement> {
        let data = self.data.borrow();
        data.parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|data| MemoryElement { data })
    }

    pub fn has_listener(&self, event: &str) -> bool {
        self.data
            .borrow()
            .listeners
            .iter()
            .any(|(name, _)| name == event)
    }

    /// Fire every listener registered for `event.name` on this element.
    pub fn emit(&self, event: &MemoryEvent) {
        let listeners: Vec<Listener<MemoryDocument>> = self
            .data
            .borrow()
            .listeners
            .iter()
            .filter(|(name, _)| *name == event.name)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(self, event);
        }
    }

    /// Whether two handles refer to the same element.
    pub fn ptr_eq(&self, other: &MemoryElement) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    fn set_parent(&self, parent: Option<&MemoryElement>) {
        self.data.borrow_mut().parent = parent.map(|p| Rc::downgrade(&p.data));
    }

    /// Position of this element in its parent's child list.
    fn index_in_parent(&self) -> Option<(MemoryElement, usize)> {
        let parent = self.parent()?;
        let index = parent
            .data
            .borrow()
            .children
            .iter()
            .position(|child| matches!(child.as_element(), Some(e) if e.ptr_eq(self)))?;
        Some((parent, index))
    }

    /// Serialize this element to an HTML-ish string for assertions.
    ///
    /// Attributes render in insertion order; collected style properties
    /// render as a single `style` attribute; live boolean properties render
    /// as `:name` pseudo-attributes so tests can tell them apart from
    /// string attributes.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.data.borrow();
        out.push('<');
        out.push_str(&data.tag);
        for (name, value) in &data.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        if !data.styles.is_empty() {
            out.push_str(" style=\"");
            for (i, (name, value)) in data.styles.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(name);
                out.push_str(": ");
                out.push_str(value);
                out.push(';');
            }
            out.push('"');
        }
        for (name, value) in &data.bool_props {
            if *value {
                out.push_str(" :");
                out.push_str(name);
            }
        }
        out.push('>');
        for child in &data.children {
            match child {
                MemoryNode::Element(e) => e.write_html(out),
                MemoryNode::Text(t) => out.push_str(t),
            }
        }
        out.push_str("</");
        out.push_str(&data.tag);
        out.push('>');
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &data.tag)
            .field("children", &data.children.len())
            .finish()
    }
}

impl Host for MemoryDocument {
    type Element = MemoryElement;
    type Event = MemoryEvent;

    fn create_element(&self, tag: &str) -> MemoryElement {
        MemoryElement::new(tag)
    }

    fn set_attribute(&self, target: &MemoryElement, name: &str, value: &str) {
        target
            .data
            .borrow_mut()
            .attrs
            .insert(name.into(), value.into());
    }

    fn set_bool_property(&self, target: &MemoryElement, name: &str, value: bool) {
        target
            .data
            .borrow_mut()
            .bool_props
            .insert(name.into(), value);
    }

    fn set_style_property(&self, target: &MemoryElement, name: &str, value: &str) {
        target
            .data
            .borrow_mut()
            .styles
            .insert(name.into(), value.into());
    }

    fn add_event_listener(
        &self,
        target: &MemoryElement,
        event: &str,
        listener: Listener<MemoryDocument>,
    ) {
        target
            .data
            .borrow_mut()
            .listeners
            .push((event.into(), listener));
    }

    fn append_element(&self, parent: &MemoryElement, child: &MemoryElement) {
        child.set_parent(Some(parent));
        parent
            .data
            .borrow_mut()
            .children
            .push(MemoryNode::Element(child.clone()));
    }

    fn append_text(&self, parent: &MemoryElement, text: &str) {
        parent
            .data
            .borrow_mut()
            .children
            .push(MemoryNode::Text(text.into()));
    }

    fn prepend_element(&self, parent: &MemoryElement, child: &MemoryElement) {
        child.set_parent(Some(parent));
        parent
            .data
            .borrow_mut()
            .children
            .insert(0, MemoryNode::Element(child.clone()));
    }

    fn insert_adjacent(
        &self,
        anchor: &MemoryElement,
        position: InsertPosition,
        child: &MemoryElement,
    ) {
        match position {
            InsertPosition::AfterBegin => self.prepend_element(anchor, child),
            InsertPosition::BeforeEnd => self.append_element(anchor, child),
            InsertPosition::BeforeBegin | InsertPosition::AfterEnd => {
                // Outside-insertion needs a parent; with a detached anchor
                // there is nowhere to put the child, like on a real DOM.
                let Some((parent, index)) = anchor.index_in_parent() else {
                    return;
                };
                let index = match position {
                    InsertPosition::BeforeBegin => index,
                    _ => index + 1,
                };
                child.set_parent(Some(&parent));
                parent
                    .data
                    .borrow_mut()
                    .children
                    .insert(index, MemoryNode::Element(child.clone()));
            }
        }
    }

    fn replace_element(&self, old: &MemoryElement, new: &MemoryElement) {
        let Some((parent, index)) = old.index_in_parent() else {
            return;
        };
        new.set_parent(Some(&parent));
        old.set_parent(None);
        parent.data.borrow_mut().children[index] = MemoryNode::Element(new.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_to_html() {
        let doc = MemoryDocument::new();
        let root = doc.root("body");
        let p = doc.create_element("p");
        doc.append_text(&p, "Hello");
        doc.append_element(&root, &p);
        assert_eq!(root.to_html(), "<body><p>Hello</p></body>");
    }

    #[test]
    fn test_prepend_goes_first() {
        let doc = MemoryDocument::new();
        let root = doc.root("ul");
        doc.append_element(&root, &doc.create_element("li"));
        let first = doc.create_element("p");
        doc.prepend_element(&root, &first);
        assert!(root.children()[0].as_element().unwrap().ptr_eq(&first));
    }

    #[test]
    fn test_insert_adjacent_positions() {
        let doc = MemoryDocument::new();
        let root = doc.root("div");
        let anchor = doc.create_element("a");
        doc.append_element(&root, &anchor);

        let before = doc.create_element("b");
        doc.insert_adjacent(&anchor, InsertPosition::BeforeBegin, &before);
        let after = doc.create_element("i");
        doc.insert_adjacent(&anchor, InsertPosition::AfterEnd, &after);
        let inside_front = doc.create_element("u");
        doc.insert_adjacent(&anchor, InsertPosition::AfterBegin, &inside_front);

        assert_eq!(root.to_html(), "<div><b></b><a><u></u></a><i></i></div>");
    }

    #[test]
    fn test_replace_swaps_in_place() {
        let doc = MemoryDocument::new();
        let root = doc.root("div");
        let old = doc.create_element("span");
        doc.append_element(&root, &old);
        doc.append_element(&root, &doc.create_element("em"));

        let new = doc.create_element("strong");
        doc.replace_element(&old, &new);
        assert_eq!(root.to_html(), "<div><strong></strong><em></em></div>");
        assert!(old.parent().is_none());
    }

    #[test]
    fn test_emit_fires_matching_listeners() {
        use std::cell::Cell;

        let doc = MemoryDocument::new();
        let button = doc.create_element("button");
        let clicks = Rc::new(Cell::new(0));
        let seen = Rc::clone(&clicks);
        doc.add_event_listener(
            &button,
            "click",
            Rc::new(move |_, _| seen.set(seen.get() + 1)),
        );

        button.emit(&MemoryEvent::new("click"));
        button.emit(&MemoryEvent::new("keydown"));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_styles_render_in_style_attribute() {
        let doc = MemoryDocument::new();
        let el = doc.create_element("div");
        doc.set_style_property(&el, "color", "red");
        doc.set_style_property(&el, "margin", "0");
        assert_eq!(el.to_html(), "<div style=\"color: red; margin: 0;\"></div>");
    }
}
