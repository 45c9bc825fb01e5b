//! HTML output.

use super::document::{Document, NodeData, NodeId};
use super::is_void;

/// Quote an attribute value for output.
///
/// Values are stored as written in the source, so only the delimiter needs
/// escaping.
fn quote_attr(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

enum Step {
    Enter(NodeId),
    Close(NodeId),
}

/// Write `id` and everything below it.
///
/// Walks with an explicit stack so nesting depth is bounded by memory only.
pub(super) fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let mut stack = vec![Step::Enter(id)];

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Enter(id) => id,
            Step::Close(id) => {
                if let NodeData::Element(el) = doc.data(id) {
                    out.push_str("</");
                    out.push_str(&el.name);
                    out.push('>');
                }
                continue;
            }
        };

        match doc.data(id) {
            NodeData::Root => {
                stack.extend(doc.children(id).iter().rev().map(|c| Step::Enter(*c)));
            }
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Doctype(text) => {
                out.push_str("<!");
                out.push_str(text);
                out.push('>');
            }
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.name);
                for attr in &el.attrs {
                    out.push(' ');
                    out.push_str(&attr.name);
                    if let Some(value) = &attr.value {
                        out.push('=');
                        quote_attr(value, out);
                    }
                }
                out.push('>');
                if is_void(&el.name) {
                    continue;
                }
                stack.push(Step::Close(id));
                stack.extend(doc.children(id).iter().rev().map(|c| Step::Enter(*c)));
            }
        }
    }
}
