//! Markup tree for pages
//!
//! Pages are parsed into an arena-backed [`Document`]. Widgets address nodes by
//! [`NodeId`] and mutate the tree in place; [`Document::to_html`] writes it back.
//!
//! # Module Structure
//!
//! - `document` - Arena tree, node data and structural edits
//! - `parser` - Tolerant HTML tokenizer building a `Document`
//! - `serialize` - HTML output

mod document;
mod parser;
mod serialize;

pub use document::{Ancestors, Attribute, Document, Element, NodeData, NodeId};
pub use parser::{parse_document, parse_fragment_into};

/// Elements that never have children or an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose content is kept verbatim as a single text node.
pub(crate) const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

pub(crate) fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub(crate) fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}
