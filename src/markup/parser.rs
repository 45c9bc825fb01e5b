//! Tolerant HTML parsing.
//!
//! This is not a full HTML5 tree builder. It handles what authored
//! site pages contain: elements with quoted, unquoted and bare attributes,
//! void and self-closing elements, comments, doctypes and raw-text
//! `<script>`/`<style>` bodies. Unmatched end tags are ignored and unclosed
//! elements are closed at the end of input. Text is kept verbatim.

use super::document::{Attribute, Document, Element, NodeId};
use super::{is_raw_text, is_void};

/// Parse a complete page
pub fn parse_document(input: &str) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    parse_fragment_into(&mut doc, root, input);
    doc
}

/// Parse `input` and append the resulting nodes to `parent`.
///
/// Returns the nodes appended directly under `parent`, in order.
pub fn parse_fragment_into(doc: &mut Document, parent: NodeId, input: &str) -> Vec<NodeId> {
    let mut builder = TreeBuilder {
        doc,
        parent,
        stack: vec![parent],
        inserted: Vec::new(),
    };

    let bytes = input.as_bytes();
    let mut idx = 0_usize;
    let mut text_start = 0_usize;

    while idx < bytes.len() {
        if bytes[idx] != b'<' {
            idx = find_byte(bytes, idx, b'<').unwrap_or(bytes.len());
            continue;
        }

        if starts_with(bytes, idx, b"<!--") {
            builder.text(&input[text_start..idx]);
            let body_start = idx.saturating_add(4);
            let (body, next) = match find_subslice(bytes, body_start, b"-->") {
                Some(end) => (&input[body_start..end], end.saturating_add(3)),
                None => (&input[body_start.min(bytes.len())..], bytes.len()),
            };
            let node = builder.doc.create_comment(body);
            builder.append(node);
            idx = next;
            text_start = next;
            continue;
        }

        if starts_with(bytes, idx, b"<!") {
            builder.text(&input[text_start..idx]);
            let body_start = idx.saturating_add(2);
            let (body, next) = match find_byte(bytes, body_start, b'>') {
                Some(end) => (&input[body_start..end], end.saturating_add(1)),
                None => (&input[body_start.min(bytes.len())..], bytes.len()),
            };
            let node = builder.doc.create_doctype(body);
            builder.append(node);
            idx = next;
            text_start = next;
            continue;
        }

        let Some((tag, next_idx)) = parse_tag(input, idx) else {
            // A stray '<' stays part of the surrounding text
            idx = idx.saturating_add(1);
            continue;
        };

        builder.text(&input[text_start..idx]);

        if tag.is_end {
            builder.close(&tag.name);
            idx = next_idx;
            text_start = next_idx;
            continue;
        }

        let name = tag.name.clone();
        let element = builder.doc.create_element(Element {
            name: tag.name,
            attrs: tag.attrs,
        });
        builder.append(element);

        if tag.self_closing || is_void(&name) {
            idx = next_idx;
            text_start = next_idx;
            continue;
        }

        if is_raw_text(&name) {
            let (raw, after_raw) = read_raw_text_until_end_tag(input, next_idx, &name);
            if !raw.is_empty() {
                let text = builder.doc.create_text(raw);
                builder.doc.append_child(element, text);
            }
            idx = after_raw;
            text_start = after_raw;
            continue;
        }

        builder.stack.push(element);
        idx = next_idx;
        text_start = next_idx;
    }

    builder.text(&input[text_start.min(bytes.len())..]);
    builder.inserted
}

struct TreeBuilder<'a> {
    doc: &'a mut Document,
    parent: NodeId,
    stack: Vec<NodeId>,
    inserted: Vec<NodeId>,
}

impl TreeBuilder<'_> {
    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.parent)
    }

    fn append(&mut self, node: NodeId) {
        let current = self.current();
        self.doc.append_child(current, node);
        if current == self.parent {
            self.inserted.push(node);
        }
    }

    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let node = self.doc.create_text(text);
        self.append(node);
    }

    fn close(&mut self, name: &str) {
        // Index 0 is the insertion parent and is never popped
        let open = self
            .stack
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find(|(_, id)| self.doc.tag_name(**id) == Some(name))
            .map(|(pos, _)| pos);

        if let Some(pos) = open {
            self.stack.truncate(pos);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedTag {
    name: String,
    attrs: Vec<Attribute>,
    is_end: bool,
    self_closing: bool,
}

fn parse_tag(input: &str, start: usize) -> Option<(ParsedTag, usize)> {
    let bytes = input.as_bytes();
    if bytes.get(start).copied() != Some(b'<') {
        return None;
    }

    let mut idx = start.saturating_add(1);
    let mut is_end = false;
    if bytes.get(idx).copied() == Some(b'/') {
        is_end = true;
        idx = idx.saturating_add(1);
    }

    let name_start = idx;
    while idx < bytes.len() && is_tag_name_char(bytes[idx]) {
        idx = idx.saturating_add(1);
    }
    if idx == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return None;
    }
    let name = input[name_start..idx].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        idx = skip_spaces(bytes, idx);
        match bytes.get(idx).copied() {
            None => return None,
            Some(b'>') => {
                return Some((
                    ParsedTag {
                        name,
                        attrs,
                        is_end,
                        self_closing: false,
                    },
                    idx.saturating_add(1),
                ));
            }
            Some(b'/') => {
                if bytes.get(idx.saturating_add(1)).copied() == Some(b'>') {
                    return Some((
                        ParsedTag {
                            name,
                            attrs,
                            is_end,
                            self_closing: true,
                        },
                        idx.saturating_add(2),
                    ));
                }
                idx = idx.saturating_add(1);
            }
            Some(b'=') => {
                // Value without a name
                idx = idx.saturating_add(1);
            }
            Some(_) => {
                let (attr, next) = parse_attribute(input, idx)?;
                if !attrs.iter().any(|a: &Attribute| a.name == attr.name) {
                    attrs.push(attr);
                }
                idx = next;
            }
        }
    }
}

fn parse_attribute(input: &str, start: usize) -> Option<(Attribute, usize)> {
    let bytes = input.as_bytes();
    let mut idx = start;
    while idx < bytes.len()
        && !bytes[idx].is_ascii_whitespace()
        && !matches!(bytes[idx], b'=' | b'>' | b'/')
    {
        idx = idx.saturating_add(1);
    }
    if idx == start {
        return None;
    }
    let name = input[start..idx].to_ascii_lowercase();

    let after_name = skip_spaces(bytes, idx);
    if bytes.get(after_name).copied() != Some(b'=') {
        return Some((Attribute { name, value: None }, idx));
    }

    let value_start = skip_spaces(bytes, after_name.saturating_add(1));
    match bytes.get(value_start).copied() {
        None => None,
        Some(quote @ (b'"' | b'\'')) => {
            let body_start = value_start.saturating_add(1);
            let end = find_byte(bytes, body_start, quote)?;
            Some((
                Attribute {
                    name,
                    value: Some(input[body_start..end].to_string()),
                },
                end.saturating_add(1),
            ))
        }
        Some(_) => {
            let mut end = value_start;
            while end < bytes.len() && !bytes[end].is_ascii_whitespace() && bytes[end] != b'>' {
                end = end.saturating_add(1);
            }
            Some((
                Attribute {
                    name,
                    value: Some(input[value_start..end].to_string()),
                },
                end,
            ))
        }
    }
}

fn read_raw_text_until_end_tag<'a>(
    input: &'a str,
    start: usize,
    tag_name: &str,
) -> (&'a str, usize) {
    let bytes = input.as_bytes();
    let tag_bytes = tag_name.as_bytes();
    let mut idx = start;

    while idx < bytes.len() {
        if bytes[idx] == b'<'
            && bytes.get(idx.saturating_add(1)).copied() == Some(b'/')
            && starts_with_ignore_ascii_case(bytes, idx.saturating_add(2), tag_bytes)
        {
            if let Some((tag, end_idx)) = parse_tag(input, idx) {
                if tag.is_end && tag.name == tag_name {
                    return (&input[start..idx], end_idx);
                }
            }
        }
        idx = idx.saturating_add(1);
    }

    (&input[start.min(bytes.len())..], bytes.len())
}

fn skip_spaces(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx = idx.saturating_add(1);
    }
    idx
}

fn is_tag_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':')
}

fn starts_with(bytes: &[u8], idx: usize, pattern: &[u8]) -> bool {
    let end = idx.saturating_add(pattern.len());
    end <= bytes.len() && bytes[idx..end] == *pattern
}

fn starts_with_ignore_ascii_case(bytes: &[u8], idx: usize, pattern: &[u8]) -> bool {
    let end = idx.saturating_add(pattern.len());
    if end > bytes.len() {
        return false;
    }

    bytes[idx..end]
        .iter()
        .zip(pattern.iter())
        .all(|(left, right)| left.eq_ignore_ascii_case(right))
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }

    bytes[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

fn find_byte(bytes: &[u8], from: usize, byte: u8) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }

    bytes[from..]
        .iter()
        .position(|candidate| *candidate == byte)
        .map(|offset| from + offset)
}
