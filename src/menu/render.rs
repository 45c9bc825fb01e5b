//! Presentation flags.
//!
//! Writes the registry's open/deepest/overlay state back onto the markup.

use crate::markup::Document;

use super::node::Lifecycle;
use super::tree::MenuTree;

pub const CLASS_NODE: &str = "menu-node";
pub const CLASS_OPEN: &str = "open";
pub const CLASS_DEEPEST: &str = "deepest";
pub const CLASS_TOGGLE: &str = "menu-toggle";
pub const CLASS_PANEL: &str = "menu-panel";
pub const CLASS_LIST: &str = "menu-list";
pub const CLASS_ENTRY: &str = "menu-entry";
pub const CLASS_ITEM: &str = "menu-item";
pub const CLASS_OVERLAY: &str = "menu-overlay";
pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_DISABLED: &str = "disabled";

pub const ATTR_LEVEL: &str = "data-level";
pub const ATTR_TOGGLE: &str = "data-menu-toggle";
pub const ATTR_DISMISS: &str = "data-menu-dismiss";

/// Sync every materialized node and the overlay surface with `tree`
pub fn apply(doc: &mut Document, tree: &MenuTree) {
    for node in tree.nodes() {
        if node.lifecycle() != Lifecycle::Materialized {
            continue;
        }
        let Some(element) = node.element() else {
            continue;
        };

        if let Some(el) = doc.element_mut(element) {
            el.toggle_class(CLASS_OPEN, node.is_open());
            el.toggle_class(CLASS_DEEPEST, node.is_deepest());
            el.set_attr(ATTR_LEVEL, node.level().to_string());
        }

        if let Some(presentation) = node.presentation() {
            if let Some(panel) = doc.element_mut(presentation.panel) {
                if node.is_open() {
                    panel.remove_attr("hidden");
                } else {
                    panel.set_flag("hidden");
                }
            }
        }
    }

    if let Some(surface) = tree.overlay().surface() {
        if let Some(el) = doc.element_mut(surface) {
            el.toggle_class(CLASS_ACTIVE, tree.overlay().is_active());
        }
    }
}
