//! Scenario: Author writing footnotes
//!
//! Journey: An author sprinkles footnote tags through an article; the page
//! gets numbered references and one collected list before the update date.

use siteweave::footnote::FootnoteState;
use siteweave::{DiagnosticKind, Page, PageOptions};

/// SCENARIO: two footnotes share one container placed before the date
#[test]
fn scenario_numbered_footnotes_before_date() {
    let source = concat!(
        r#"<main><p>One<x-footnote> first </x-footnote> two<x-footnote>second</x-footnote></p>"#,
        r#"<p id="date-updated">Updated</p></main>"#,
    );
    let page = Page::parse(source, PageOptions::default());

    assert_eq!(page.footnote_count(), 2);
    assert_eq!(
        page.render(),
        concat!(
            r##"<main><p>One<sup><a class="footnote-ref" href="#footnote-1" id="footnote-ref-1">1</a></sup>"##,
            r##" two<sup><a class="footnote-ref" href="#footnote-2" id="footnote-ref-2">2</a></sup></p>"##,
            r#"<div id="footnotes"><ol>"#,
            "<li id=\"footnote-1\"><p>first<a class=\"footnote-back\" href=\"#footnote-ref-1\">\u{21a9}</a></p></li>",
            "<li id=\"footnote-2\"><p>second<a class=\"footnote-back\" href=\"#footnote-ref-2\">\u{21a9}</a></p></li>",
            r#"</ol></div><p id="date-updated">Updated</p></main>"#,
        )
    );
    assert!(page.diagnostics().is_empty());
}

/// SCENARIO: an author-provided container is reused
#[test]
fn scenario_existing_container_is_reused() {
    let source = concat!(
        r#"<main><div id="footnotes"><h2>Notes</h2><ol></ol></div>"#,
        r#"<p>A<x-footnote>x</x-footnote></p></main>"#,
    );
    let page = Page::parse(source, PageOptions::default());
    let html = page.render();

    assert_eq!(html.matches(r#"id="footnotes""#).count(), 1);
    assert!(html.ends_with(concat!(
        r#"<div id="footnotes"><h2>Notes</h2><ol><li id="footnote-1"><p>x"#,
        "<a class=\"footnote-back\" href=\"#footnote-ref-1\">\u{21a9}</a></p></li></ol></div></main>",
    )));
}

/// SCENARIO: without a content host nothing moves and an error is reported
#[test]
fn scenario_missing_content_host() {
    let page = Page::parse("<p>A<x-footnote>x</x-footnote></p>", PageOptions::default());

    assert_eq!(page.render(), "<p>A<x-footnote>x</x-footnote></p>");
    assert_eq!(page.footnotes().notes()[0].state(), FootnoteState::Failed);
    assert!(page
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::ContentHostMissing));
}

/// SCENARIO: a container without a list is reported
#[test]
fn scenario_container_without_list() {
    let page = Page::parse(
        r#"<main><div id="footnotes"></div><p>A<x-footnote>x</x-footnote></p></main>"#,
        PageOptions::default(),
    );

    assert_eq!(page.footnote_count(), 0);
    assert!(page
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::FootnoteListMissing));
}

/// SCENARIO: a note inside a menu nested too deep goes away with the menu
#[test]
fn scenario_footnote_in_removed_menu_is_dropped() {
    let source = concat!(
        r#"<main><x-menu id="top-menu" label="1"><x-menu id="l2" label="2">"#,
        r#"<x-menu id="l3" label="3"><a href="/x">x</a><x-menu id="l4" label="4">"#,
        r#"<p>deep<x-footnote>hidden note</x-footnote></p></x-menu></x-menu></x-menu></x-menu>"#,
        r#"<p>Body<x-footnote>visible note</x-footnote></p></main>"#,
    );
    let page = Page::parse(source, PageOptions::default());
    let html = page.render();

    assert_eq!(page.footnote_count(), 1);
    assert!(!html.contains("hidden note"));
    assert!(html.contains(r##"<li id="footnote-1"><p>visible note"##));
    assert!(html.contains(r#"id="footnote-ref-1""#));
    assert!(!html.contains("footnote-2"));
    assert!(page
        .diagnostics()
        .iter()
        .any(|d| d.kind == DiagnosticKind::DepthExceeded { level: 4 }));
}
