//! Browser host backend for sprig.
//!
//! Implements [`sprig::Host`] against the real DOM through `web-sys`, so
//! trees built with `sprig` mount straight into the page. Event listeners
//! are registered as JS closures owned by the document for the lifetime of
//! the page.

use sprig::{Error, Host, InsertPosition, Listener, Node};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::UnwrapThrowExt;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, HtmlElement};

/// The browser document as a sprig host.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    /// Grab the window's document.
    pub fn new() -> Self {
        let document = web_sys::window()
            .expect_throw("no window")
            .document()
            .expect_throw("no document");
        Self { document }
    }

    /// The `<body>` element, the usual mount anchor.
    pub fn body(&self) -> Element {
        self.document.body().expect_throw("document has no body").into()
    }
}

impl Default for BrowserDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Mount a tree as the last child of the page body.
pub fn mount_to_body(node: &Node<BrowserDocument>) -> Result<Element, Error> {
    let doc = BrowserDocument::new();
    let body = doc.body();
    tracing::debug!("mounting tree to body");
    node.append_to(&doc, &body)
}

/// Route tracing events to the browser console.
pub fn init_tracing() {
    let _ = wasm_tracing::set_as_global_default();
}

impl Host for BrowserDocument {
    type Element = Element;
    type Event = Event;

    fn create_element(&self, tag: &str) -> Element {
        self.document.create_element(tag).unwrap_throw()
    }

    fn set_attribute(&self, target: &Element, name: &str, value: &str) {
        target.set_attribute(name, value).unwrap_throw();
    }

    fn set_bool_property(&self, target: &Element, name: &str, value: bool) {
        // A live property assignment, not an attribute: checked/disabled/
        // hidden and friends keep their host-native boolean semantics.
        js_sys::Reflect::set(
            target.as_ref(),
            &JsValue::from_str(name),
            &JsValue::from_bool(value),
        )
        .unwrap_throw();
    }

    fn set_style_property(&self, target: &Element, name: &str, value: &str) {
        if let Some(el) = target.dyn_ref::<HtmlElement>() {
            el.style().set_property(name, value).unwrap_throw();
        }
    }

    fn add_event_listener(&self, target: &Element, event: &str, listener: Listener<Self>) {
        let element = target.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            listener(&element, &event);
        });
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .unwrap_throw();
        // Hand ownership to the JS side; the listener lives as long as the
        // node it is registered on.
        closure.forget();
    }

    fn append_element(&self, parent: &Element, child: &Element) {
        parent.append_with_node_1(child).unwrap_throw();
    }

    fn append_text(&self, parent: &Element, text: &str) {
        parent.append_with_str_1(text).unwrap_throw();
    }

    fn prepend_element(&self, parent: &Element, child: &Element) {
        parent.prepend_with_node_1(child).unwrap_throw();
    }

    fn insert_adjacent(&self, anchor: &Element, position: InsertPosition, child: &Element) {
        anchor
            .insert_adjacent_element(position.as_str(), child)
            .unwrap_throw();
    }

    fn replace_element(&self, old: &Element, new: &Element) {
        old.replace_with_with_node_1(new).unwrap_throw();
    }
}
