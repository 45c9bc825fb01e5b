#![no_main]

use libfuzzer_sys::fuzz_target;
use siteweave::{Page, PageOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let mut page = Page::parse(content, PageOptions::default());

    let keys: Vec<String> = page.menus().nodes().map(|n| n.key().to_string()).collect();
    for key in &keys {
        let _ = page.activate(key);
        assert!(page.menus().has_single_open_path());
    }
    page.dismiss();
    assert!(page.menus().open_nodes().is_empty());
    let _ = page.render();
});
