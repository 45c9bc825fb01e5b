//! Content materializer.
//!
//! Runs once per node, after its child markup exists: classifies the children,
//! wraps them in list entries and renders the panel and disclosure control.

use crate::config::MenuConfig;
use crate::error::{WeaveError, WeaveResult};
use crate::markup::{Document, Element, NodeId};

use super::node::{Lifecycle, MenuEntry, MenuId, Presentation};
use super::render::{
    ATTR_DISMISS, ATTR_TOGGLE, CLASS_DISABLED, CLASS_ENTRY, CLASS_ITEM, CLASS_LIST, CLASS_NODE,
    CLASS_OVERLAY, CLASS_PANEL, CLASS_TOGGLE,
};
use super::tree::MenuTree;

/// Page facts the materializer needs
#[derive(Debug, Clone, Copy)]
pub struct MaterializeContext<'a> {
    pub config: &'a MenuConfig,
    /// URL path of the page being rendered
    pub current_path: &'a str,
}

/// What materialization did to a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Panel and control rendered
    Ready,
    /// Nested too deep; the node and its subtree were removed
    Detached { level: u8, removed: Vec<MenuId> },
    /// Already materialized, rejected or gone
    Skipped,
}

/// Materialize `id`.
///
/// A missing label rejects the node and leaves its element untouched.
pub fn materialize(
    doc: &mut Document,
    tree: &mut MenuTree,
    id: MenuId,
    ctx: &MaterializeContext<'_>,
) -> WeaveResult<Outcome> {
    let Some(node) = tree.get(id) else {
        return Ok(Outcome::Skipped);
    };
    if node.lifecycle != Lifecycle::Pending {
        return Ok(Outcome::Skipped);
    }
    let Some(element) = node.element else {
        return Ok(Outcome::Skipped);
    };

    let label = node.label.trim().to_string();
    if label.is_empty() {
        let key = node.key.clone();
        if let Some(node) = tree.get_mut(id) {
            node.lifecycle = Lifecycle::Rejected;
        }
        return Err(WeaveError::MissingLabel { element: key });
    }

    if let Some(outcome) = prune(doc, tree, id) {
        return Ok(outcome);
    }
    let Some(node) = tree.get(id) else {
        return Ok(Outcome::Skipped);
    };

    let key = node.key.clone();
    let level = node.level;
    let is_top = node.is_top;

    let entries = wrap_children(doc, tree, element);

    let control = doc.create_element(
        Element::new("button")
            .with_attr("type", "button")
            .with_attr("class", CLASS_TOGGLE)
            .with_attr(ATTR_TOGGLE, key.as_str()),
    );
    let text = doc.create_text(label);
    doc.append_child(control, text);

    let panel = doc.create_element(
        Element::new("div")
            .with_attr("class", CLASS_PANEL)
            .with_flag("hidden"),
    );
    let list = doc.create_element(Element::new("ul").with_attr("class", CLASS_LIST));
    for entry in entries.iter().map(|(shell, _)| *shell) {
        doc.append_child(list, entry);
    }
    doc.append_child(panel, list);
    doc.append_child(element, control);
    doc.append_child(element, panel);

    if let Some(el) = doc.element_mut(element) {
        el.add_class(CLASS_NODE);
        el.set_attr("data-level", level.to_string());
        if el.id().is_none() {
            el.set_attr("id", key.as_str());
        }
    }

    if is_top {
        wire_root(doc, tree, element, ctx);
    }

    tree.set_children(id, entries.into_iter().map(|(_, entry)| entry).collect());
    if let Some(node) = tree.get_mut(id) {
        node.lifecycle = Lifecycle::Materialized;
        node.presentation = Some(Presentation {
            control,
            panel,
            list,
        });
    }

    Ok(Outcome::Ready)
}

/// Move every element child of `element` into its own list-entry shell.
/// Returns `(shell, entry)` pairs in markup order.
fn wrap_children(
    doc: &mut Document,
    tree: &MenuTree,
    element: NodeId,
) -> Vec<(NodeId, MenuEntry)> {
    let children = doc.take_children(element);
    let mut out = Vec::new();

    for child in children {
        if doc.element(child).is_none() {
            continue;
        }

        let entry = match tree.find_by_element(child) {
            Some(nested) => MenuEntry::Menu(nested),
            None => {
                if let Some(el) = doc.element_mut(child) {
                    el.add_class(CLASS_ITEM);
                }
                MenuEntry::Item(child)
            }
        };

        let shell = doc.create_element(Element::new("li").with_attr("class", CLASS_ENTRY));
        doc.append_child(shell, child);
        out.push((shell, entry));
    }
    out
}

fn wire_root(doc: &mut Document, tree: &mut MenuTree, element: NodeId, ctx: &MaterializeContext<'_>) {
    let config = ctx.config;

    let surface = match doc.find_by_id(&config.overlay_id) {
        Some(existing) => existing,
        None => {
            let created = doc.create_element(
                Element::new("div")
                    .with_attr("id", config.overlay_id.as_str())
                    .with_attr("class", CLASS_OVERLAY),
            );
            doc.append_child(element, created);
            created
        }
    };
    if let Some(el) = doc.element_mut(surface) {
        el.set_flag(ATTR_DISMISS);
    }
    tree.overlay.surface = Some(surface);

    if let Some(top) = doc.find_by_id(&config.top_control_id) {
        if let Some(el) = doc.element_mut(top) {
            el.set_flag(ATTR_DISMISS);
        }
        tree.overlay.top_control = Some(top);
    }

    if config.is_site_root(ctx.current_path) {
        if let Some(back) = doc.find_by_id(&config.back_control_id) {
            if let Some(el) = doc.element_mut(back) {
                el.set_flag("disabled");
                el.add_class(CLASS_DISABLED);
            }
        }
    }
}

/// Detach `id` from the document and the registry when it sits deeper than
/// [`MAX_LEVEL`](super::MAX_LEVEL). Works on pending nodes, so a too-deep menu
/// goes away even if its content never arrives.
pub(crate) fn prune(doc: &mut Document, tree: &mut MenuTree, id: MenuId) -> Option<Outcome> {
    let node = tree.get(id)?;
    if !node.exceeds_max_level() {
        return None;
    }
    let level = node.level;
    if let Some(element) = node.element {
        remove_from_document(doc, element);
    }
    let removed = tree.detach(id);
    Some(Outcome::Detached { level, removed })
}

/// Remove a rejected element, plus the list entry that held it when that entry
/// is left empty.
fn remove_from_document(doc: &mut Document, element: NodeId) {
    let shell = doc
        .parent(element)
        .filter(|p| doc.element(*p).is_some_and(|el| el.has_class(CLASS_ENTRY)));

    doc.detach(element);

    if let Some(shell) = shell {
        if !doc.has_content(shell) {
            doc.detach(shell);
        }
    }
}
