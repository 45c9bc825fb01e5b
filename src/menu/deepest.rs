//! Deepest-node tracker.

use super::tree::MenuTree;

/// Recompute `is_deepest` for every node from the settled open flags.
///
/// A node is deepest when it is open, is not the root and has no open
/// descendant.
pub fn recompute(tree: &mut MenuTree) {
    let ids = tree.ids();
    for id in &ids {
        if let Some(node) = tree.get_mut(*id) {
            node.is_deepest = false;
        }
    }

    let marked: Vec<_> = ids
        .iter()
        .copied()
        .filter(|id| {
            tree.get(*id)
                .is_some_and(|n| n.is_open && !n.is_top)
        })
        .filter(|id| !tree.descendants(*id).iter().any(|d| tree.is_open(*d)))
        .collect();

    for id in marked {
        if let Some(node) = tree.get_mut(id) {
            node.is_deepest = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::node::MenuId;

    fn open(tree: &mut MenuTree, ids: &[MenuId]) {
        for id in ids {
            tree.get_mut(*id).unwrap().is_open = true;
        }
    }

    #[test]
    fn innermost_open_node_is_deepest() {
        let mut tree = MenuTree::new();
        let root = tree.insert(None, "top-menu", "Menu");
        tree.mark_top(root);
        let a = tree.insert(Some(root), "a", "A");
        let b = tree.insert(Some(a), "b", "B");
        open(&mut tree, &[root, a, b]);

        recompute(&mut tree);
        assert_eq!(tree.deepest_nodes(), vec![b]);
    }

    #[test]
    fn root_is_never_deepest() {
        let mut tree = MenuTree::new();
        let root = tree.insert(None, "top-menu", "Menu");
        tree.mark_top(root);
        open(&mut tree, &[root]);

        recompute(&mut tree);
        assert!(tree.deepest_nodes().is_empty());
    }

    #[test]
    fn stale_marks_are_cleared() {
        let mut tree = MenuTree::new();
        let root = tree.insert(None, "top-menu", "Menu");
        tree.mark_top(root);
        let a = tree.insert(Some(root), "a", "A");
        open(&mut tree, &[root, a]);
        recompute(&mut tree);
        assert_eq!(tree.deepest_nodes(), vec![a]);

        tree.get_mut(a).unwrap().is_open = false;
        recompute(&mut tree);
        assert!(tree.deepest_nodes().is_empty());
    }
}
