//! Toggle controller.
//!
//! Turns a [`Trigger`] into new open/closed flags for every menu and the
//! overlay, then reruns the deepest-node pass. Transitions cannot fail: they
//! only flip flags on an already validated tree. Unknown ids are ignored.

use super::deepest;
use super::node::MenuId;
use super::tree::MenuTree;

/// A user interaction the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A node's own disclosure control was activated
    Toggle(MenuId),
    /// The overlay (or the top control) was activated
    Dismiss,
}

/// Apply `trigger` to `tree`
pub fn apply(tree: &mut MenuTree, trigger: Trigger) {
    match trigger {
        Trigger::Toggle(id) if tree.root() == Some(id) => toggle_root(tree, id),
        Trigger::Toggle(id) => toggle_nested(tree, id),
        Trigger::Dismiss => dismiss(tree),
    }
    deepest::recompute(tree);
}

fn toggle_root(tree: &mut MenuTree, root: MenuId) {
    for id in tree.ids() {
        if id == root {
            continue;
        }
        set_open(tree, id, false);
    }

    if let Some(node) = tree.get_mut(root) {
        node.is_open = !node.is_open;
    }
    tree.overlay.active = !tree.overlay.active;
}

fn toggle_nested(tree: &mut MenuTree, target: MenuId) {
    let Some(was_open) = tree.get(target).map(|n| n.is_open) else {
        return;
    };
    let root = tree.root();
    let ancestors = tree.ancestors(target);

    for id in tree.ids() {
        if Some(id) == root {
            continue;
        }

        if id == target {
            set_open(tree, id, !was_open);
        } else if tree.is_descendant(id, target) {
            // Closing collapses everything beneath; opening leaves the
            // (already closed) subtree alone
            if was_open {
                set_open(tree, id, false);
            }
        } else if ancestors.contains(&id) {
            // Opening reveals the breadcrumb above the target
            if !was_open {
                set_open(tree, id, true);
            }
        } else {
            set_open(tree, id, false);
        }
    }
}

fn dismiss(tree: &mut MenuTree) {
    for id in tree.ids() {
        set_open(tree, id, false);
    }
    tree.overlay.active = false;
}

fn set_open(tree: &mut MenuTree, id: MenuId, open: bool) {
    if let Some(node) = tree.get_mut(id) {
        node.is_open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        tree: MenuTree,
        root: MenuId,
        a: MenuId,
        b: MenuId,
        c: MenuId,
        d: MenuId,
    }

    // root
    // ├── a
    // │   └── b
    // └── c
    //     └── d
    fn fixture() -> Fixture {
        let mut tree = MenuTree::new();
        let root = tree.insert(None, "top-menu", "Menu");
        tree.mark_top(root);
        let a = tree.insert(Some(root), "a", "A");
        let b = tree.insert(Some(a), "b", "B");
        let c = tree.insert(Some(root), "c", "C");
        let d = tree.insert(Some(c), "d", "D");
        Fixture {
            tree,
            root,
            a,
            b,
            c,
            d,
        }
    }

    #[test]
    fn root_toggle_flips_root_and_overlay() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        assert!(f.tree.is_open(f.root));
        assert!(f.tree.overlay().is_active());

        apply(&mut f.tree, Trigger::Toggle(f.root));
        assert!(!f.tree.is_open(f.root));
        assert!(!f.tree.overlay().is_active());
    }

    #[test]
    fn root_toggle_closes_nested_nodes() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        apply(&mut f.tree, Trigger::Toggle(f.b));
        assert!(f.tree.is_open(f.a));

        apply(&mut f.tree, Trigger::Toggle(f.root));
        assert_eq!(f.tree.open_nodes(), Vec::<MenuId>::new());
    }

    #[test]
    fn opening_a_branch_closes_the_other() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        apply(&mut f.tree, Trigger::Toggle(f.a));
        apply(&mut f.tree, Trigger::Toggle(f.b));

        apply(&mut f.tree, Trigger::Toggle(f.c));
        assert!(!f.tree.is_open(f.a));
        assert!(!f.tree.is_open(f.b));
        assert!(f.tree.is_open(f.c));
        assert!(f.tree.is_open(f.root));
    }

    #[test]
    fn opening_deep_node_keeps_ancestors() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        apply(&mut f.tree, Trigger::Toggle(f.c));
        apply(&mut f.tree, Trigger::Toggle(f.d));

        assert_eq!(f.tree.open_path(), vec![f.root, f.c, f.d]);
    }

    #[test]
    fn closing_collapses_descendants_only() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        apply(&mut f.tree, Trigger::Toggle(f.a));
        apply(&mut f.tree, Trigger::Toggle(f.b));

        apply(&mut f.tree, Trigger::Toggle(f.a));
        assert!(!f.tree.is_open(f.a));
        assert!(!f.tree.is_open(f.b));
        assert!(f.tree.is_open(f.root));
    }

    #[test]
    fn closing_leaf_keeps_parent_open() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        apply(&mut f.tree, Trigger::Toggle(f.b));
        apply(&mut f.tree, Trigger::Toggle(f.b));

        assert!(f.tree.is_open(f.a));
        assert!(!f.tree.is_open(f.b));
    }

    #[test]
    fn opening_hidden_node_reveals_nested_ancestors_only() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.b));

        assert!(f.tree.is_open(f.a));
        assert!(f.tree.is_open(f.b));
        assert!(!f.tree.is_open(f.root));
        assert!(!f.tree.overlay().is_active());
    }

    #[test]
    fn nested_toggle_leaves_overlay_alone() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        apply(&mut f.tree, Trigger::Toggle(f.a));
        apply(&mut f.tree, Trigger::Toggle(f.a));
        assert!(f.tree.overlay().is_active());
    }

    #[test]
    fn dismiss_closes_everything_and_is_idempotent() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        apply(&mut f.tree, Trigger::Toggle(f.d));

        apply(&mut f.tree, Trigger::Dismiss);
        let once = (f.tree.open_nodes(), f.tree.overlay().is_active());
        apply(&mut f.tree, Trigger::Dismiss);
        let twice = (f.tree.open_nodes(), f.tree.overlay().is_active());

        assert_eq!(once, (Vec::new(), false));
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut f = fixture();
        apply(&mut f.tree, Trigger::Toggle(f.root));
        f.tree.detach(f.c);
        apply(&mut f.tree, Trigger::Toggle(f.c));

        assert_eq!(f.tree.open_nodes(), vec![f.root]);
    }
}
