//! Markup serialization - turn a node tree into indented pseudo-markup text.
//!
//! This is a one-way renderer, not a parser; re-parsing the output is not a
//! supported round-trip. Output is deterministic for a fixed tree:
//!
//! - one tab per nesting level, node children each on their own line
//! - content leaves render inline after the open tag
//! - boolean-true props render as bare attribute names
//! - every other attribute value renders JSON-encoded
//! - a fixed set of self-closing tags never emits children

use std::fmt::Write;

use crate::error::Error;
use crate::host::Host;
use crate::node::{Child, Node, NodeType, Template};
use crate::props::{PropValue, StyleValue};

/// Tags that always render as a single self-closed tag, children never
/// emitted.
const SELF_CLOSING: &[&str] = &[
    "area", "base", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
];

impl<H: Host> Node<H> {
    /// Render this tree as indented markup text.
    ///
    /// Components expand their template to serialize, which is the only way
    /// this can fail (a constructor-style component without `produce`).
    pub fn to_markup(&self) -> Result<String, Error> {
        let mut out = String::new();
        self.write_markup(&mut out, 0)?;
        Ok(out)
    }

    pub(crate) fn write_markup(&self, out: &mut String, depth: usize) -> Result<(), Error> {
        match self.node_type() {
            NodeType::Elem => self.write_elem(out, depth),
            NodeType::Frag => self.write_frag(out, depth),
            NodeType::Comp => self.expand()?.write_markup(out, depth),
        }
    }

    fn write_elem(&self, out: &mut String, depth: usize) -> Result<(), Error> {
        let (tag, children) = {
            let inner = self.inner.borrow();
            let tag = match &inner.template {
                Template::Tag(tag) => tag.clone(),
                _ => unreachable!("write_elem is only reached for element nodes"),
            };
            (tag, inner.children.clone())
        };

        out.push('<');
        out.push_str(&tag);
        for (name, value) in self.inner.borrow().props.iter() {
            write_attr(out, name, value);
        }

        if SELF_CLOSING.contains(&tag.as_str()) {
            out.push_str("/>");
            return Ok(());
        }
        out.push('>');

        let mut wrote_block = false;
        for child in &children {
            match child {
                Child::Content(c) => out.push_str(&c.render_text()),
                Child::Node(n) => {
                    out.push('\n');
                    write_indent(out, depth + 1);
                    n.write_markup(out, depth + 1)?;
                    wrote_block = true;
                }
            }
        }
        if wrote_block {
            out.push('\n');
            write_indent(out, depth);
        }

        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
        Ok(())
    }

    /// A fragment has no tag of its own; its children render in sequence,
    /// node children separated by newline-plus-indent.
    fn write_frag(&self, out: &mut String, depth: usize) -> Result<(), Error> {
        let mut first = true;
        for child in &self.children() {
            match child {
                Child::Content(c) => out.push_str(&c.render_text()),
                Child::Node(n) => {
                    if !first {
                        out.push('\n');
                        write_indent(out, depth);
                    }
                    n.write_markup(out, depth)?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Render one attribute. Function-valued props and injected descendants are
/// skipped; `cl` canonicalizes to `class`; boolean-true renders the bare
/// name; null props are omitted; everything else renders `name=<json>`.
fn write_attr<H: Host>(out: &mut String, name: &str, value: &PropValue<H>) {
    match value {
        PropValue::Listener(_) | PropValue::Children(_) | PropValue::Null => return,
        _ => {}
    }

    out.push(' ');
    out.push_str(if name == "cl" { "class" } else { name });

    match value {
        PropValue::Bool(true) => {}
        PropValue::Bool(false) => out.push_str("=false"),
        PropValue::Int(n) => {
            let _ = write!(out, "={n}");
        }
        PropValue::Float(n) => {
            let _ = write!(out, "={n}");
        }
        PropValue::Str(s) => {
            out.push('=');
            write_json_str(out, s);
        }
        PropValue::Style(StyleValue::Raw(s)) => {
            out.push('=');
            write_json_str(out, s);
        }
        PropValue::Style(StyleValue::Map(map)) => {
            out.push_str("={");
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_str(out, k);
                out.push(':');
                write_json_str(out, v);
            }
            out.push('}');
        }
        PropValue::Listener(_) | PropValue::Children(_) | PropValue::Null => unreachable!(),
    }
}

/// JSON string encoding, quotes included.
fn write_json_str(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use crate::memory::MemoryDocument;
    use crate::{Node, PropValue, Props, StyleValue, Value};

    type N = Node<MemoryDocument>;
    type P = Props<MemoryDocument>;

    fn text(s: &str) -> Value<MemoryDocument> {
        s.into()
    }

    #[test]
    fn test_list_markup() {
        let tree = N::elem(
            "ul",
            (),
            [
                N::elem("li", (), [text("a")]).into(),
                N::elem("li", (), [text("b")]).into(),
            ],
        );
        assert_eq!(
            tree.to_markup().unwrap(),
            "<ul>\n\t<li>a</li>\n\t<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_empty_element_has_no_newline() {
        let tree = N::elem("div", (), []);
        assert_eq!(tree.to_markup().unwrap(), "<div></div>");
    }

    #[test]
    fn test_nested_indentation_uses_tabs() {
        let tree = N::elem(
            "div",
            (),
            [N::elem("section", (), [N::elem("p", (), [text("x")]).into()]).into()],
        );
        assert_eq!(
            tree.to_markup().unwrap(),
            "<div>\n\t<section>\n\t\t<p>x</p>\n\t</section>\n</div>"
        );
    }

    #[test]
    fn test_self_closing_never_emits_children() {
        let tree = N::elem("img", P::new().with("src", "a.png"), [text("ignored")]);
        assert_eq!(tree.to_markup().unwrap(), "<img src=\"a.png\"/>");
    }

    #[test]
    fn test_cl_aliases_to_class() {
        let a = N::elem("div", P::new().with("cl", "x"), []);
        let b = N::elem("div", P::new().with("class", "x"), []);
        assert_eq!(a.to_markup().unwrap(), "<div class=\"x\"></div>");
        assert_eq!(a.to_markup().unwrap(), b.to_markup().unwrap());
    }

    #[test]
    fn test_boolean_true_renders_bare_name() {
        let tree = N::elem("input", P::new().with("checked", true), []);
        assert_eq!(tree.to_markup().unwrap(), "<input checked/>");
    }

    #[test]
    fn test_boolean_false_renders_json_value() {
        let tree = N::elem("div", P::new().with("draggable", false), []);
        assert_eq!(tree.to_markup().unwrap(), "<div draggable=false></div>");
    }

    #[test]
    fn test_null_props_are_omitted() {
        let tree = N::elem(
            "div",
            P::new()
                .with("id", "app")
                .with("missing", PropValue::Null),
            [],
        );
        assert_eq!(tree.to_markup().unwrap(), "<div id=\"app\"></div>");
    }

    #[test]
    fn test_listener_props_are_skipped() {
        let tree = N::elem(
            "button",
            P::new()
                .with("onclick", PropValue::listener(|_, _| {}))
                .with("id", "go"),
            [text("Go")],
        );
        assert_eq!(tree.to_markup().unwrap(), "<button id=\"go\">Go</button>");
    }

    #[test]
    fn test_numeric_props_render_bare() {
        let tree = N::elem("td", P::new().with("colspan", 2i64), []);
        assert_eq!(tree.to_markup().unwrap(), "<td colspan=2></td>");
    }

    #[test]
    fn test_string_props_json_escape() {
        let tree = N::elem("div", P::new().with("title", "say \"hi\"\n"), []);
        assert_eq!(
            tree.to_markup().unwrap(),
            "<div title=\"say \\\"hi\\\"\\n\"></div>"
        );
    }

    #[test]
    fn test_style_map_renders_as_json_object() {
        let tree = N::elem(
            "div",
            P::new().with("style", StyleValue::map([("color", "red")])),
            [],
        );
        assert_eq!(
            tree.to_markup().unwrap(),
            "<div style={\"color\":\"red\"}></div>"
        );
    }

    #[test]
    fn test_mixed_content_and_node_children() {
        let tree = N::elem("div", (), [text("x"), N::elem("span", (), [text("y")]).into()]);
        assert_eq!(
            tree.to_markup().unwrap(),
            "<div>x\n\t<span>y</span>\n</div>"
        );
    }

    #[test]
    fn test_fragment_serializes_children_in_sequence() {
        let tree = N::frag([
            N::elem("li", (), [text("a")]).into(),
            N::elem("li", (), [text("b")]).into(),
        ]);
        assert_eq!(tree.to_markup().unwrap(), "<li>a</li>\n<li>b</li>");
    }

    #[test]
    fn test_component_serializes_via_subtree() {
        let comp = N::comp(
            |_, _| Node::elem("div", (), ["hello".into()]),
            (),
            [],
        );
        assert_eq!(comp.to_markup().unwrap(), "<div>hello</div>");
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let tree = N::elem(
            "ul",
            P::new().with("cl", "list").with("data-kind", "demo"),
            [N::elem("li", (), [text("a")]).into()],
        );
        assert_eq!(tree.to_markup().unwrap(), tree.to_markup().unwrap());
    }
}
