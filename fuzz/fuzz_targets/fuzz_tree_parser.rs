//! Fuzz target for typed-tree documents.
//!
//! Goal: loading a tree and mapping its diagnostics to line/column must **never panic**,
//! even when offsets point past the text or into the middle of a character.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_tree_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = tsconform_host::fuzz::parse_tree(text);
    }
});
