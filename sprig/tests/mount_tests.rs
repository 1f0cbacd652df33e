//! Tests for element and fragment mounting against the in-memory document.

use std::cell::Cell;
use std::rc::Rc;

use sprig::memory::{MemoryDocument, MemoryElement, MemoryEvent};
use sprig::{Error, Host, InsertPosition, Node, PropValue, Props, StyleValue, Value};

type N = Node<MemoryDocument>;
type P = Props<MemoryDocument>;

fn text(s: &str) -> Value<MemoryDocument> {
    s.into()
}

#[test]
fn test_append_to_materializes_one_element() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let tree = N::elem("p", (), [text("Hello")]);
    let node = tree.append_to(&doc, &body).unwrap();

    assert_eq!(body.to_html(), "<body><p>Hello</p></body>");
    assert_eq!(node.tag(), "p");
    assert!(tree.root().is_some_and(|root| root.ptr_eq(&node)));
}

#[test]
fn test_children_mount_in_order() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    N::elem(
        "ul",
        (),
        [
            N::elem("li", (), [text("a")]).into(),
            N::elem("li", (), [text("b")]).into(),
            text("tail"),
        ],
    )
    .append_to(&doc, &body)
    .unwrap();

    assert_eq!(
        body.to_html(),
        "<body><ul><li>a</li><li>b</li>tail</ul></body>"
    );
}

#[test]
fn test_string_attributes_and_aliases() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let label = N::elem(
        "label",
        P::new().with("cl", "field").with("htmlFor", "name"),
        [text("Name")],
    );
    let node = label.append_to(&doc, &body).unwrap();

    assert_eq!(node.attr("class").unwrap(), "field");
    assert_eq!(node.attr("for").unwrap(), "name");
    assert_eq!(node.attr("cl"), None);
    assert_eq!(node.attr("htmlFor"), None);
}

#[test]
fn test_null_props_are_skipped() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let node = N::elem("div", P::new().with("missing", PropValue::Null), [])
        .append_to(&doc, &body)
        .unwrap();
    assert_eq!(node.attr("missing"), None);
}

#[test]
fn test_boolean_props_split_on_hyphen() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let node = N::elem(
        "input",
        P::new()
            .with("checked", true)
            .with("data-active", true),
        [],
    )
    .append_to(&doc, &body)
    .unwrap();

    // Hyphen-less boolean becomes a live property, hyphenated one a string
    // attribute.
    assert_eq!(node.bool_prop("checked"), Some(true));
    assert_eq!(node.attr("checked"), None);
    assert_eq!(node.attr("data-active").unwrap(), "true");
    assert_eq!(node.bool_prop("data-active"), None);
}

#[test]
fn test_style_string_sets_raw_attribute() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let node = N::elem("div", P::new().with("style", "color: red"), [])
        .append_to(&doc, &body)
        .unwrap();
    assert_eq!(node.attr("style").unwrap(), "color: red");
}

#[test]
fn test_style_map_applies_properties() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let node = N::elem(
        "div",
        P::new().with("style", StyleValue::map([("color", "red"), ("margin", "0")])),
        [],
    )
    .append_to(&doc, &body)
    .unwrap();

    assert_eq!(node.style("color").unwrap(), "red");
    assert_eq!(node.style("margin").unwrap(), "0");
    assert_eq!(node.attr("style"), None);
}

#[test]
fn test_event_prop_registers_listener_bound_to_node() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let clicked = Rc::new(Cell::new(false));
    let seen = Rc::clone(&clicked);
    let button = N::elem(
        "button",
        P::new().with(
            "onclick",
            PropValue::listener(move |el: &MemoryElement, _event: &MemoryEvent| {
                // The listener receives the host element it fired on.
                assert_eq!(el.tag(), "button");
                seen.set(true);
            }),
        ),
        [text("Go")],
    );
    let node = button.append_to(&doc, &body).unwrap();

    assert!(node.has_listener("click"));
    assert_eq!(node.attr("onclick"), None);
    node.emit(&MemoryEvent::new("click"));
    assert!(clicked.get());
}

#[test]
fn test_raw_content_attaches_directly() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let foreign = doc.create_element("canvas");
    N::elem("div", (), [Value::raw(foreign.clone())])
        .append_to(&doc, &body)
        .unwrap();

    let div = body.children()[0].as_element().unwrap().clone();
    assert!(div.children()[0].as_element().unwrap().ptr_eq(&foreign));
}

#[test]
fn test_prepend_and_insert_positions() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");
    N::elem("main", (), []).append_to(&doc, &body).unwrap();

    N::elem("header", (), []).prepend_to(&doc, &body).unwrap();
    assert_eq!(
        body.to_html(),
        "<body><header></header><main></main></body>"
    );

    let main = body.children()[1].as_element().unwrap().clone();
    N::elem("nav", (), [])
        .insert_at(&doc, &main, InsertPosition::BeforeBegin)
        .unwrap();
    N::elem("footer", (), [])
        .insert_at(&doc, &main, InsertPosition::AfterEnd)
        .unwrap();
    N::elem("h1", (), [])
        .insert_at(&doc, &main, InsertPosition::AfterBegin)
        .unwrap();
    assert_eq!(
        body.to_html(),
        "<body><header></header><nav></nav><main><h1></h1></main><footer></footer></body>"
    );
}

#[test]
fn test_replace_swaps_the_anchor() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");
    let old = N::elem("span", (), [text("old")])
        .append_to(&doc, &body)
        .unwrap();

    N::elem("strong", (), [text("new")])
        .replace(&doc, &old)
        .unwrap();
    assert_eq!(body.to_html(), "<body><strong>new</strong></body>");
}

#[test]
fn test_every_mount_creates_fresh_nodes() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let tree = N::elem("p", (), [text("x")]);
    let first = tree.append_to(&doc, &body).unwrap();
    let second = tree.append_to(&doc, &body).unwrap();

    assert!(!first.ptr_eq(&second));
    assert_eq!(body.child_count(), 2);
    // `root` tracks the most recent materialization.
    assert!(tree.root().is_some_and(|root| root.ptr_eq(&second)));
}

// ============================================================================
// Fragments
// ============================================================================

#[test]
fn test_frag_append_splices_children_as_siblings() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    N::frag([
        N::elem("li", (), [text("a")]).into(),
        N::elem("li", (), [text("b")]).into(),
        text("c"),
    ])
    .append_to(&doc, &body)
    .unwrap();

    // Three children in order, no intervening node owned by the fragment.
    assert_eq!(body.to_html(), "<body><li>a</li><li>b</li>c</body>");
}

#[test]
fn test_frag_append_returns_anchor_and_sets_no_root() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    let frag = N::frag([N::elem("li", (), []).into()]);
    let returned = frag.append_to(&doc, &body).unwrap();

    assert!(returned.ptr_eq(&body));
    assert!(frag.root().is_none());
}

#[test]
fn test_frag_prepend_keeps_child_order() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");
    N::elem("main", (), []).append_to(&doc, &body).unwrap();

    N::frag([
        N::elem("a", (), []).into(),
        N::elem("b", (), []).into(),
        N::elem("c", (), []).into(),
    ])
    .prepend_to(&doc, &body)
    .unwrap();

    assert_eq!(
        body.to_html(),
        "<body><a></a><b></b><c></c><main></main></body>"
    );
}

#[test]
fn test_frag_insert_at_cascades_after_anchor() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");
    let main = N::elem("main", (), []).append_to(&doc, &body).unwrap();
    N::elem("aside", (), []).append_to(&doc, &body).unwrap();

    N::frag([
        N::elem("a", (), []).into(),
        N::elem("b", (), []).into(),
        N::elem("c", (), []).into(),
    ])
    .insert_at(&doc, &main, InsertPosition::AfterEnd)
    .unwrap();

    assert_eq!(
        body.to_html(),
        "<body><main></main><a></a><b></b><c></c><aside></aside></body>"
    );
}

#[test]
fn test_frag_prepend_appends_content_leaves() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");
    N::elem("main", (), []).append_to(&doc, &body).unwrap();

    // Content leaves are appended unconditionally during front-insertion;
    // their order relative to node children is not preserved.
    N::frag([text("leaf"), N::elem("a", (), []).into()])
        .prepend_to(&doc, &body)
        .unwrap();

    assert_eq!(body.to_html(), "<body><a></a><main></main>leaf</body>");
}

#[test]
fn test_frag_replace_is_unsupported() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");
    let anchor = N::elem("span", (), []).append_to(&doc, &body).unwrap();

    let err = N::frag([N::elem("b", (), []).into()])
        .replace(&doc, &anchor)
        .unwrap_err();
    assert_eq!(err, Error::ReplaceWithFragment);
    // The anchor is untouched.
    assert_eq!(body.to_html(), "<body><span></span></body>");
}

#[test]
fn test_nested_frag_flattens_into_parent_anchor() {
    let doc = MemoryDocument::new();
    let body = doc.root("body");

    N::elem(
        "ul",
        (),
        [N::frag([
            N::elem("li", (), [text("a")]).into(),
            N::elem("li", (), [text("b")]).into(),
        ])
        .into()],
    )
    .append_to(&doc, &body)
    .unwrap();

    assert_eq!(body.to_html(), "<body><ul><li>a</li><li>b</li></ul></body>");
}
