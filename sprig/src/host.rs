//! Host document abstraction.
//!
//! The core never touches a concrete document. Everything it needs from the
//! platform - creating elements, setting attributes and styles, registering
//! listeners, and the four attachment operations - goes through [`Host`].
//! The [`memory`](crate::memory) module ships an in-memory implementation;
//! the `sprig-web` crate implements it against the browser DOM.

use std::rc::Rc;

/// Event listener registered on a host element.
///
/// The listener receives the element it was registered on as its first
/// argument, so handlers can reach "their" node without captures.
pub type Listener<H: Host> = Rc<dyn Fn(&<H as Host>::Element, &<H as Host>::Event)>;

/// Relative insertion modes for [`insert_adjacent`](Host::insert_adjacent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before the anchor itself, outside it.
    BeforeBegin,
    /// Inside the anchor, before its first child.
    AfterBegin,
    /// Inside the anchor, after its last child.
    BeforeEnd,
    /// After the anchor itself, outside it.
    AfterEnd,
}

impl InsertPosition {
    /// The DOM `insertAdjacentElement` position keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertPosition::BeforeBegin => "beforebegin",
            InsertPosition::AfterBegin => "afterbegin",
            InsertPosition::BeforeEnd => "beforeend",
            InsertPosition::AfterEnd => "afterend",
        }
    }
}

/// A live document the tree mounts into.
///
/// Implementations own node creation and mutation; the core assumes
/// exclusive, unsynchronized access to whatever anchor it is given and calls
/// these operations synchronously.
pub trait Host: Sized {
    /// Cheap-clone handle to one host element.
    type Element: Clone;
    /// Event payload delivered to listeners.
    type Event;

    /// Create a detached element for `tag`.
    fn create_element(&self, tag: &str) -> Self::Element;

    /// Set a string attribute.
    fn set_attribute(&self, target: &Self::Element, name: &str, value: &str);

    /// Assign a live boolean property (not a string attribute), so
    /// host-native boolean semantics apply.
    fn set_bool_property(&self, target: &Self::Element, name: &str, value: bool);

    /// Set a single style property.
    fn set_style_property(&self, target: &Self::Element, name: &str, value: &str);

    /// Register an event listener for `event` (name without the `on` prefix).
    fn add_event_listener(&self, target: &Self::Element, event: &str, listener: Listener<Self>);

    /// Append `child` as the last child of `parent`.
    fn append_element(&self, parent: &Self::Element, child: &Self::Element);

    /// Append a text node to `parent`.
    fn append_text(&self, parent: &Self::Element, text: &str);

    /// Insert `child` as the first child of `parent`.
    fn prepend_element(&self, parent: &Self::Element, child: &Self::Element);

    /// Insert `child` relative to `anchor` at `position`.
    fn insert_adjacent(
        &self,
        anchor: &Self::Element,
        position: InsertPosition,
        child: &Self::Element,
    );

    /// Replace `old` with `new` in old's parent.
    fn replace_element(&self, old: &Self::Element, new: &Self::Element);
}
