//! Retained-tree markup construction.
//!
//! sprig builds an in-memory node tree describing markup - intrinsic
//! elements, components, fragments, text - then mounts that tree onto a
//! live document by creating real nodes and attaching them at a
//! caller-specified position.
//!
//! - **Node tree**: a closed set of node kinds ([`NodeType::Elem`],
//!   [`NodeType::Comp`], [`NodeType::Frag`]) plus [`Content`] leaves, with
//!   normalized children management
//! - **Mounting**: four positional operations (`append_to`, `prepend_to`,
//!   `insert_at`, `replace`) against any [`Host`] document
//! - **Components**: render functions or constructor-style templates with
//!   lifecycle hooks and in-place re-rendering via [`Node::re`]
//! - **Serialization**: deterministic indented markup via
//!   [`Node::to_markup`]
//!
//! Re-rendering fully discards and rebuilds the mounted subtree; there is
//! no diffing, scheduling, or batching. Everything is single-threaded and
//! synchronous.
//!
//! # Example
//!
//! ```rust
//! use sprig::memory::MemoryDocument;
//! use sprig::{Node, Props};
//!
//! let doc = MemoryDocument::new();
//! let body = doc.root("body");
//!
//! let list: Node<MemoryDocument> = Node::elem(
//!     "ul",
//!     Props::new().with("cl", "items"),
//!     [
//!         Node::elem("li", (), ["a".into()]).into(),
//!         Node::elem("li", (), ["b".into()]).into(),
//!     ],
//! );
//!
//! // Serialize without a document...
//! assert_eq!(
//!     list.to_markup().unwrap(),
//!     "<ul class=\"items\">\n\t<li>a</li>\n\t<li>b</li>\n</ul>"
//! );
//!
//! // ...or mount onto one.
//! list.append_to(&doc, &body).unwrap();
//! assert_eq!(
//!     body.to_html(),
//!     "<body><ul class=\"items\"><li>a</li><li>b</li></ul></body>"
//! );
//! ```

mod tracing_macros;
pub(crate) use tracing_macros::{debug, trace};

mod component;
mod content;
mod error;
mod host;
pub mod memory;
mod mount;
mod node;
mod props;
mod serialize;
mod stem;

pub use component::{Component, Lifecycle};
pub use content::{Content, Value};
pub use error::Error;
pub use host::{Host, InsertPosition, Listener};
pub use node::{Child, Node, NodeType, RenderFn, Template};
pub use props::{PropValue, Props, StyleValue};
pub use stem::Stem;
