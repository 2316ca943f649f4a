//! Filesystem host: locate and load configs, read typed trees, emit, and run
//! multi-project builds.
//!
//! This crate stands in for the external compiler. It is allowed to do filesystem IO but
//! never runs conformance rules itself; callers plug the pass in through the
//! post-emit hook.

#![forbid(unsafe_code)]

pub mod buildinfo;
mod discover;
mod emit;
mod load;
mod solution;

pub use discover::{
    CONFIG_FILE_NAME, discover_root_files, load_config, locate_config, normalize_path,
};
pub use emit::{EmitResult, emit, output_path};
pub use load::{load_program, parse_tree};
pub use solution::{BuildStatus, ProjectOutcome, ProjectStatus, SolutionBuilder, SolutionOutcome};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use tsconform_types::RepoPath;

    /// Parse arbitrary text as a typed-tree document and compute its line map.
    pub fn parse_tree(text: &str) -> anyhow::Result<()> {
        let file = super::load::parse_tree(text)?;
        let lines = file.line_map();
        let _ = file.compiler_diagnostics(&lines);
        Ok(())
    }

    /// Parse arbitrary text as an exemption file.
    pub fn parse_exemptions(text: &str) -> usize {
        let parsed = tsconform_settings::parse_exemptions(&RepoPath::new("exemptions.json"), text);
        parsed.diagnostics.len()
    }

    /// Parse arbitrary text as a `tsconfig.json`.
    pub fn parse_tsconfig(text: &str) -> anyhow::Result<()> {
        let cfg = tsconform_settings::parse_tsconfig(text)?;
        let _ = tsconform_settings::resolve_config(cfg, camino::Utf8Path::new("/fuzz/tsconfig.json"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fuzz_parsers_never_panic(input in ".*") {
            let _ = fuzz::parse_tree(&input);
            let _ = fuzz::parse_exemptions(&input);
            let _ = fuzz::parse_tsconfig(&input);
        }
    }
}
