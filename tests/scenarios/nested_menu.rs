//! Scenario: Reader navigating a three-level menu
//!
//! Journey: A reader opens nested menus, backs out of them and dismisses the
//! whole menu through the overlay and the top control.
//!
//! Success Criteria:
//! - Exactly one open path at any time
//! - Only the innermost open menu is marked deepest
//! - The overlay follows the root menu and resets everything

use siteweave::{Config, DiagnosticKind, Lifecycle, Page, PageOptions, Trigger, WeaveError};

use crate::common::MENU_PAGE;

fn page(path: &str) -> Page {
    Page::parse(MENU_PAGE, PageOptions::from_config(&Config::default(), path))
}

fn open_keys(page: &Page) -> Vec<String> {
    let tree = page.menus();
    tree.open_path()
        .into_iter()
        .filter_map(|id| tree.get(id).map(|n| n.key().to_string()))
        .collect()
}

fn deepest_keys(page: &Page) -> Vec<String> {
    let tree = page.menus();
    tree.deepest_nodes()
        .into_iter()
        .filter_map(|id| tree.get(id).map(|n| n.key().to_string()))
        .collect()
}

/// SCENARIO: open the innermost menu, close its parent, toggle the root
#[test]
fn scenario_breadcrumb_open_and_close() {
    let mut page = page("/posts/one.html");
    assert_eq!(page.menus().len(), 3);
    assert!(page
        .menus()
        .nodes()
        .all(|n| n.lifecycle() == Lifecycle::Materialized));

    // Step 1: open B directly; A is revealed above it
    let trigger = page.activate("b").unwrap();
    assert!(matches!(trigger, Trigger::Toggle(_)));
    assert_eq!(open_keys(&page), ["top-menu", "a", "b"]);
    assert_eq!(deepest_keys(&page), ["b"]);
    let html = page.render();
    assert!(html.contains(r#"<x-menu id="b" label="B" class="menu-node open deepest" data-level="3">"#));
    assert!(html.contains(r#"<x-menu id="a" label="A" class="menu-node open" data-level="2">"#));

    // Step 2: close A; B goes with it
    page.activate("a").unwrap();
    assert_eq!(open_keys(&page), ["top-menu"]);
    assert!(deepest_keys(&page).is_empty());
    assert!(!page.render().contains("deepest"));

    // Step 3: the root control opens the root and the overlay, never deepest
    page.activate("top-menu").unwrap();
    assert!(page.menus().is_open(page.menus().root().unwrap()));
    assert!(page.menus().overlay().is_active());
    assert!(deepest_keys(&page).is_empty());
    assert!(page
        .render()
        .contains(r#"class="menu-overlay active""#));
}

/// SCENARIO: the overlay and the top control both reset the menu
#[test]
fn scenario_dismiss_from_overlay_and_top_control() {
    let mut page = page("/posts/one.html");

    page.activate("top-menu").unwrap();
    page.activate("a").unwrap();
    assert_eq!(open_keys(&page), ["top-menu", "a"]);

    assert_eq!(page.activate("menu-overlay").unwrap(), Trigger::Dismiss);
    assert!(page.menus().open_nodes().is_empty());
    assert!(!page.menus().overlay().is_active());
    assert!(page.render().contains(r#"class="menu-overlay""#));

    page.activate("top-menu").unwrap();
    page.activate("b").unwrap();
    assert_eq!(page.activate("back-to-top").unwrap(), Trigger::Dismiss);
    assert!(page.menus().open_nodes().is_empty());

    // Dismissing again changes nothing
    let before = page.render();
    page.dismiss();
    assert_eq!(page.render(), before);
}

/// SCENARIO: switching branches closes the old one
#[test]
fn scenario_switching_branches() {
    let source = concat!(
        r#"<x-menu id="top-menu" label="Menu">"#,
        r#"<x-menu id="docs" label="Docs"><a href="/d">D</a></x-menu>"#,
        r#"<x-menu id="blog" label="Blog"><a href="/b">B</a></x-menu>"#,
        r#"</x-menu>"#,
    );
    let mut page = Page::parse(source, PageOptions::default());

    page.activate("docs").unwrap();
    assert_eq!(open_keys(&page), ["top-menu", "docs"]);

    page.activate("blog").unwrap();
    assert_eq!(open_keys(&page), ["top-menu", "blog"]);
    assert_eq!(deepest_keys(&page), ["blog"]);
    assert!(page.menus().has_single_open_path());
}

/// SCENARIO: the back control is disabled on the site root only
#[test]
fn scenario_back_control_on_site_root() {
    let home = page("/");
    assert!(home
        .render()
        .contains(r#"<button id="back" disabled class="disabled">Back</button>"#));

    let post = page("/posts/one.html");
    assert!(post.render().contains(r#"<button id="back">Back</button>"#));
}

/// SCENARIO: menu content arrives after the page is attached
#[test]
fn scenario_late_content() {
    let mut page = Page::parse(
        r#"<x-menu id="top-menu" label="Menu"></x-menu>"#,
        PageOptions::default(),
    );
    let root = page.menus().root().unwrap();
    assert_eq!(page.menus().get(root).unwrap().lifecycle(), Lifecycle::Pending);
    assert!(page
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::PendingContent));
    assert!(matches!(
        page.activate("top-menu"),
        Err(WeaveError::UnknownControl { .. })
    ));

    let element = page.menus().get(root).unwrap().element().unwrap();
    page.insert_content(element, r#"<a href="/">Home</a>"#);

    assert_eq!(
        page.menus().get(root).unwrap().lifecycle(),
        Lifecycle::Materialized
    );
    assert!(page.diagnostics().is_empty());
    assert!(page.render().contains(r#"<a href="/" class="menu-item">Home</a>"#));

    // A second notification does not render twice
    page.insert_content(element, " ");
    assert_eq!(page.render().matches("<button").count(), 1);
}

/// SCENARIO: unknown controls are reported, not ignored
#[test]
fn scenario_unknown_control() {
    let mut page = page("/");
    let err = page.activate("nope").unwrap_err();
    assert!(matches!(err, WeaveError::UnknownControl { ref target } if target == "nope"));
}
