//! Fuzz target for exemption files.
//!
//! Goal: malformed input becomes diagnostics, never a panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_exemption_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = tsconform_host::fuzz::parse_exemptions(text);
    }
});
