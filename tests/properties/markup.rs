//! Property tests for the markup parser and page attachment.

use proptest::prelude::*;

use siteweave::markup::parse_document;
use siteweave::{Page, PageOptions};

fn text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z ]{0,8}").unwrap()
}

fn attr() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["id", "class", "href", "label"]),
        proptest::string::string_regex("[a-z0-9 -]{0,6}").unwrap(),
    )
        .prop_map(|(name, value)| format!(r#" {name}="{value}""#))
}

/// Well-formed markup, written exactly the way the serializer writes it
fn markup() -> impl Strategy<Value = String> {
    let leaf = text();
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            prop::sample::select(vec!["div", "p", "span", "ul", "li", "main", "section"]),
            proptest::option::of(attr()),
            proptest::collection::vec(inner, 0..4),
        )
            .prop_map(|(tag, attr, children)| {
                format!(
                    "<{tag}{}>{}</{tag}>",
                    attr.unwrap_or_default(),
                    children.concat()
                )
            })
    })
}

/// Pages mixing menus, footnotes and arbitrary nesting
fn widget_markup() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        text(),
        text().prop_map(|t| format!("<a href=\"/\">{t}</a>")),
        text().prop_map(|t| format!("<x-footnote>{t}</x-footnote>")),
    ];
    leaf.prop_recursive(5, 40, 3, |inner| {
        (
            prop::sample::select(vec!["x-menu", "div", "main"]),
            proptest::option::of(proptest::string::string_regex("[a-z]{1,4}").unwrap()),
            proptest::collection::vec(inner, 0..3),
        )
            .prop_map(|(tag, label, children)| match label {
                Some(label) => format!(r#"<{tag} label="{label}">{}</{tag}>"#, children.concat()),
                None => format!("<{tag}>{}</{tag}>", children.concat()),
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,256}") {
        let doc = parse_document(&s);
        let _ = doc.to_html();
    }

    /// PROPERTY: Well-formed markup survives a parse/serialize round trip.
    #[test]
    fn property_well_formed_round_trip(s in markup()) {
        prop_assert_eq!(parse_document(&s).to_html(), s);
    }

    /// PROPERTY: Attaching widgets never panics, never keeps a menu past the
    /// supported depth (rendered or pending), and gives every menu its own key.
    #[test]
    fn property_attach_respects_depth(s in widget_markup()) {
        let page = Page::parse(&s, PageOptions::default());
        let mut keys = Vec::new();
        for node in page.menus().nodes() {
            prop_assert!(node.level() <= siteweave::MAX_LEVEL);
            keys.push(node.key().to_string());
        }
        let total = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), total);
        let _ = page.render();
    }
}
