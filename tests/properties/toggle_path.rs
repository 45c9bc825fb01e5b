//! Property tests for the menu toggle state machine.

use proptest::prelude::*;

use siteweave::menu::{apply_trigger, MenuId, MenuTree, Trigger};

/// A tree shape: for every non-root node, the index of its parent among the
/// nodes created before it (0 is the root).
fn tree_shape() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(any::<prop::sample::Index>(), 0..10).prop_map(|picks| {
        picks
            .iter()
            .enumerate()
            .map(|(i, pick)| pick.index(i + 1))
            .collect()
    })
}

/// Build a tree from `shape`. Returns the tree and every id, root first.
fn build(shape: &[usize]) -> (MenuTree, Vec<MenuId>) {
    let mut tree = MenuTree::new();
    let root = tree.insert(None, "top-menu", "Menu");
    tree.mark_top(root);

    let mut ids = vec![root];
    for (i, parent) in shape.iter().enumerate() {
        let id = tree.insert(Some(ids[*parent]), format!("m{i}"), format!("M{i}"));
        ids.push(id);
    }
    (tree, ids)
}

/// `None` is a dismiss; `Some(i)` toggles the i-th node (wrapping).
fn triggers() -> impl Strategy<Value = Vec<Option<prop::sample::Index>>> {
    proptest::collection::vec(proptest::option::weighted(0.85, any::<prop::sample::Index>()), 0..24)
}

fn to_trigger(step: &Option<prop::sample::Index>, ids: &[MenuId]) -> Trigger {
    match step {
        Some(index) => Trigger::Toggle(ids[index.index(ids.len())]),
        None => Trigger::Dismiss,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: After any sequence of triggers the open nodes form one
    /// unbroken path below the root.
    #[test]
    fn property_single_open_path(shape in tree_shape(), steps in triggers()) {
        let (mut tree, ids) = build(&shape);
        for step in &steps {
            apply_trigger(&mut tree, to_trigger(step, &ids));
            prop_assert!(tree.has_single_open_path());
        }
    }

    /// PROPERTY: The deepest node is exactly the innermost open non-root node.
    #[test]
    fn property_deepest_is_path_tail(shape in tree_shape(), steps in triggers()) {
        let (mut tree, ids) = build(&shape);
        for step in &steps {
            apply_trigger(&mut tree, to_trigger(step, &ids));

            let path = tree.open_path();
            let expected: Vec<MenuId> = if path.len() > 1 {
                path.last().copied().into_iter().collect()
            } else {
                Vec::new()
            };
            prop_assert_eq!(tree.deepest_nodes(), expected);
        }
    }

    /// PROPERTY: Dismiss closes everything and a second dismiss changes nothing.
    #[test]
    fn property_dismiss_idempotent(shape in tree_shape(), steps in triggers()) {
        let (mut tree, ids) = build(&shape);
        for step in &steps {
            apply_trigger(&mut tree, to_trigger(step, &ids));
        }

        apply_trigger(&mut tree, Trigger::Dismiss);
        prop_assert!(tree.open_nodes().is_empty());
        prop_assert!(tree.deepest_nodes().is_empty());
        prop_assert!(!tree.overlay().is_active());

        apply_trigger(&mut tree, Trigger::Dismiss);
        prop_assert!(tree.open_nodes().is_empty());
        prop_assert!(!tree.overlay().is_active());
    }

    /// PROPERTY: Nested toggles never move the overlay; root toggles always do.
    #[test]
    fn property_overlay_follows_root_only(shape in tree_shape(), steps in triggers()) {
        let (mut tree, ids) = build(&shape);
        for step in &steps {
            let before = tree.overlay().is_active();
            let trigger = to_trigger(step, &ids);
            apply_trigger(&mut tree, trigger);

            match trigger {
                Trigger::Toggle(id) if id == ids[0] => {
                    prop_assert_eq!(tree.overlay().is_active(), !before);
                }
                Trigger::Toggle(_) => prop_assert_eq!(tree.overlay().is_active(), before),
                Trigger::Dismiss => prop_assert!(!tree.overlay().is_active()),
            }
        }
    }
}
