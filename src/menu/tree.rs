//! Menu registry.
//!
//! Every menu of a page lives in one [`MenuTree`]. Parents are captured as
//! indices when a node is inserted, so lineage queries never touch the markup.

use crate::markup::NodeId;

use super::node::{Lifecycle, MenuEntry, MenuId, MenuNode};

/// The shared dismiss surface behind an open root menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub(crate) active: bool,
    pub(crate) surface: Option<NodeId>,
    pub(crate) top_control: Option<NodeId>,
}

impl Overlay {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Element presenting the overlay, once the root has materialized
    pub fn surface(&self) -> Option<NodeId> {
        self.surface
    }

    /// Host "top" control wired to dismiss, if the page has one
    pub fn top_control(&self) -> Option<NodeId> {
        self.top_control
    }
}

/// Arena of menu nodes
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    slots: Vec<Option<MenuNode>>,
    root: Option<MenuId>,
    pub(crate) overlay: Overlay,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node under `parent` (or at top level).
    ///
    /// The level is fixed here from the parent's level and never recomputed.
    pub fn insert(
        &mut self,
        parent: Option<MenuId>,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> MenuId {
        let id = MenuId(self.slots.len());
        let level = parent
            .and_then(|p| self.get(p))
            .map(|p| p.level.saturating_add(1))
            .unwrap_or(1);

        self.slots.push(Some(MenuNode {
            id,
            key: key.into(),
            label: label.into(),
            level,
            parent,
            is_top: false,
            is_open: false,
            is_deepest: false,
            children: Vec::new(),
            lifecycle: Lifecycle::Pending,
            element: None,
            presentation: None,
        }));
        id
    }

    /// Make `id` the distinguished root.
    ///
    /// Fails when a root already exists or the node is nested.
    pub fn mark_top(&mut self, id: MenuId) -> bool {
        if self.root.is_some() {
            return false;
        }
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        if node.parent.is_some() {
            return false;
        }
        node.is_top = true;
        self.root = Some(id);
        true
    }

    pub fn root(&self) -> Option<MenuId> {
        self.root
    }

    pub fn get(&self, id: MenuId) -> Option<&MenuNode> {
        self.slots.get(id.0).and_then(|s| s.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: MenuId) -> Option<&mut MenuNode> {
        self.slots.get_mut(id.0).and_then(|s| s.as_mut())
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Live node ids in insertion order
    pub fn ids(&self) -> Vec<MenuId> {
        self.nodes().map(|n| n.id).collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &MenuNode> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_by_key(&self, key: &str) -> Option<MenuId> {
        self.nodes().find(|n| n.key == key).map(|n| n.id)
    }

    pub fn find_by_element(&self, element: NodeId) -> Option<MenuId> {
        self.nodes()
            .find(|n| n.element == Some(element))
            .map(|n| n.id)
    }

    /// Strict ancestors of `id`, nearest first
    pub fn ancestors(&self, id: MenuId) -> Vec<MenuId> {
        let mut out = Vec::new();
        let mut next = self.get(id).and_then(|n| n.parent);
        while let Some(current) = next {
            out.push(current);
            next = self.get(current).and_then(|n| n.parent);
        }
        out
    }

    /// Whether `node` sits strictly below `of`
    pub fn is_descendant(&self, node: MenuId, of: MenuId) -> bool {
        node != of && self.ancestors(node).contains(&of)
    }

    /// Strict descendants of `id`
    pub fn descendants(&self, id: MenuId) -> Vec<MenuId> {
        self.nodes()
            .filter(|n| self.is_descendant(n.id, id))
            .map(|n| n.id)
            .collect()
    }

    pub fn is_open(&self, id: MenuId) -> bool {
        self.get(id).is_some_and(|n| n.is_open)
    }

    /// Open nodes, root included, in insertion order
    pub fn open_nodes(&self) -> Vec<MenuId> {
        self.nodes().filter(|n| n.is_open).map(|n| n.id).collect()
    }

    pub fn deepest_nodes(&self) -> Vec<MenuId> {
        self.nodes().filter(|n| n.is_deepest).map(|n| n.id).collect()
    }

    /// The breadcrumb: the root (if any) followed by the open non-root nodes
    /// from outermost to innermost.
    pub fn open_path(&self) -> Vec<MenuId> {
        let mut open: Vec<&MenuNode> = self
            .nodes()
            .filter(|n| n.is_open && !n.is_top)
            .collect();
        open.sort_by_key(|n| n.level);

        self.root
            .into_iter()
            .chain(open.into_iter().map(|n| n.id))
            .collect()
    }

    /// Whether the open non-root nodes form one unbroken chain: every open
    /// node hangs from the root, a top-level position, or another open node,
    /// and no node has two open children.
    pub fn has_single_open_path(&self) -> bool {
        let open: Vec<&MenuNode> = self
            .nodes()
            .filter(|n| n.is_open && !n.is_top)
            .collect();

        let parents_ok = open.iter().all(|n| match n.parent {
            None => true,
            Some(p) => Some(p) == self.root || self.is_open(p),
        });

        let chain_ok = open.iter().all(|a| {
            open.iter().all(|b| {
                a.id == b.id || self.is_descendant(a.id, b.id) || self.is_descendant(b.id, a.id)
            })
        });

        parents_ok && chain_ok
    }

    pub(crate) fn bind_element(&mut self, id: MenuId, element: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.element = Some(element);
        }
    }

    pub(crate) fn set_children(&mut self, id: MenuId, children: Vec<MenuEntry>) {
        if let Some(node) = self.get_mut(id) {
            node.children = children;
        }
    }

    /// Remove `id` and everything below it. Returns the removed ids.
    pub fn detach(&mut self, id: MenuId) -> Vec<MenuId> {
        if self.get(id).is_none() {
            return Vec::new();
        }

        let mut removed = self.descendants(id);
        removed.push(id);

        if let Some(parent) = self.get(id).and_then(|n| n.parent) {
            if let Some(parent) = self.get_mut(parent) {
                parent.children.retain(|e| *e != MenuEntry::Menu(id));
            }
        }

        for gone in &removed {
            if let Some(slot) = self.slots.get_mut(gone.0) {
                *slot = None;
            }
            if self.root == Some(*gone) {
                self.root = None;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_levels() -> (MenuTree, MenuId, MenuId, MenuId) {
        let mut tree = MenuTree::new();
        let root = tree.insert(None, "top-menu", "Menu");
        assert!(tree.mark_top(root));
        let a = tree.insert(Some(root), "a", "A");
        let b = tree.insert(Some(a), "b", "B");
        (tree, root, a, b)
    }

    #[test]
    fn levels_follow_parents() {
        let (tree, root, a, b) = three_levels();
        assert_eq!(tree.get(root).unwrap().level(), 1);
        assert_eq!(tree.get(a).unwrap().level(), 2);
        assert_eq!(tree.get(b).unwrap().level(), 3);
    }

    #[test]
    fn only_one_root() {
        let (mut tree, _, _, _) = three_levels();
        let other = tree.insert(None, "top-menu", "Again");
        assert!(!tree.mark_top(other));
        assert!(!tree.get(other).unwrap().is_top());
    }

    #[test]
    fn lineage_queries() {
        let (tree, root, a, b) = three_levels();
        assert_eq!(tree.ancestors(b), vec![a, root]);
        assert!(tree.is_descendant(b, root));
        assert!(!tree.is_descendant(a, b));
        assert!(!tree.is_descendant(a, a));
        assert_eq!(tree.descendants(a), vec![b]);
    }

    #[test]
    fn detach_removes_subtree() {
        let (mut tree, root, a, b) = three_levels();
        tree.set_children(root, vec![MenuEntry::Menu(a)]);

        let removed = tree.detach(a);
        assert_eq!(removed.len(), 2);
        assert!(tree.get(a).is_none());
        assert!(tree.get(b).is_none());
        assert!(tree.get(root).unwrap().children().is_empty());
        assert_eq!(tree.len(), 1);
    }
}
