//! Fuzz target for exemption matching.
//!
//! Goal: building and matching entries never panics, and an entry with no patterns
//! never matches anything.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_exemption_matching
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tsconform_domain::ExemptionEntry;
use tsconform_types::RepoPath;

#[derive(Arbitrary, Debug)]
struct MatchInput {
    paths: Vec<String>,
    prefixes: Vec<String>,
    regexps: Vec<String>,
    candidates: Vec<String>,
}

fuzz_target!(|input: MatchInput| {
    if input.paths.len() + input.prefixes.len() + input.regexps.len() > 32
        || input.candidates.len() > 64
    {
        return;
    }
    let too_long = |s: &String| s.len() > 256;
    if input.regexps.iter().any(too_long) || input.paths.iter().any(too_long) {
        return;
    }

    let empty = ExemptionEntry::new(None, &[], &[], &[]).expect("empty entry is valid");
    let entry = ExemptionEntry::new(None, &input.paths, &input.prefixes, &input.regexps).ok();

    for candidate in &input.candidates {
        let path = RepoPath::new(candidate);
        assert!(!empty.matches(&path), "empty entry matched {candidate:?}");
        if let Some(entry) = &entry {
            let _ = entry.matches(&path);
        }
    }
});
