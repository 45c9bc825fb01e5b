//! Scenario: Author building a small site
//!
//! Journey: An author keeps sources under `site/`, configures the output
//! directory, checks the pages, previews the changes and renders.
//!
//! Success Criteria:
//! - `check` catches a broken menu and passes once it is fixed
//! - `diff` lists new pages without writing anything
//! - `render` mirrors the tree and copies assets

use crate::common::*;

#[test]
fn scenario_check_diff_render() {
    let env = TestEnv::new();
    env.write("siteweave.toml", "[site]\noutput = \"dist\"\n");
    env.write("site/index.html", MENU_PAGE);
    env.write("site/posts/broken.html", BROKEN_PAGE);
    env.write("site/style.css", "body{}");

    // Step 1: check fails on the unlabeled menu
    let result = env.run(&["check"]);
    assert!(!result.success, "check should fail:\n{}", result.combined_output());
    assert!(
        result.stderr.contains("missing-label"),
        "stderr should name the problem:\n{}",
        result.stderr
    );

    // Step 2: fix it and check again
    env.write(
        "site/posts/broken.html",
        r#"<x-menu id="nav" label="Nav"><a href="/">Home</a></x-menu>"#,
    );
    let result = env.run(&["check"]);
    assert!(result.success, "check should pass:\n{}", result.combined_output());

    // Step 3: diff reports new pages and writes nothing
    let result = env.run(&["diff", "--json"]);
    assert!(result.success, "{}", result.combined_output());
    let events = result.events();
    let complete = events.last().unwrap();
    assert_eq!(complete["event"], "complete");
    assert_eq!(complete["new"], 2);
    assert_eq!(complete["new_assets"], 1);
    assert!(!env.project_path("dist").exists());

    // Step 4: render into the configured output directory
    let result = env.run(&["render"]);
    assert!(result.success, "{}", result.combined_output());
    let index = env.read("dist/index.html");
    assert!(index.contains(r#"<button id="back" disabled class="disabled">Back</button>"#));
    assert!(index.contains(r#"id="footnote-ref-1""#));
    assert_eq!(env.read("dist/style.css"), "body{}");

    // Step 5: nothing left to change
    let result = env.run(&["diff", "--json"]);
    let events = result.events();
    let complete = events.last().unwrap();
    assert_eq!(complete["new"], 0);
    assert_eq!(complete["modified"], 0);
    assert_eq!(complete["unchanged"], 2);
}
