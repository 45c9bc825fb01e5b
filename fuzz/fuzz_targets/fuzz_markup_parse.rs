#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing arbitrary markup should never panic
        let doc = siteweave::markup::parse_document(content);
        let _ = doc.to_html();
    }
});
