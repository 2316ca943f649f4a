//! Config parsing and resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.
//! Reading files is the host's job.

#![forbid(unsafe_code)]

mod exemptions;
mod model;
mod resolve;

pub use exemptions::{ExemptionEntryConfig, ExemptionFileV1, ExemptionValue, ParsedExemptions};
pub use model::{CompilerOptionsConfig, PLUGIN_NAME, PluginConfig, ProjectReference, TsConfig};
pub use resolve::{DEFAULT_INCLUDE, ResolvedConfig};

use camino::Utf8Path;
use tsconform_types::RepoPath;

/// Parse `tsconfig.json` (strict JSON) into a typed model.
pub fn parse_tsconfig(input: &str) -> anyhow::Result<TsConfig> {
    let cfg: TsConfig = serde_json::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective project configuration for the config file at `config_path`.
pub fn resolve_config(cfg: TsConfig, config_path: &Utf8Path) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, config_path)
}

/// Parse an exemption file. Never fails: problems come back as diagnostics next to
/// whatever entries could still be loaded.
pub fn parse_exemptions(file: &RepoPath, input: &str) -> ParsedExemptions {
    exemptions::parse_exemptions(file, input)
}
