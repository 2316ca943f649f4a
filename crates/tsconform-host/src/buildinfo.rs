//! Incremental build cache.
//!
//! A project is up to date when its recorded signature matches the current inputs and
//! every recorded output still exists. Up-to-date projects are skipped entirely, so a
//! caller that needs every file re-checked must [`clean`] first.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tsconform_settings::ResolvedConfig;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub version: String,
    pub signature: String,
    /// Emitted files, relative to the config directory.
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl BuildInfo {
    pub fn new(cfg: &ResolvedConfig, signature: String, outputs: &[Utf8PathBuf]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            signature,
            outputs: outputs
                .iter()
                .map(|o| {
                    o.strip_prefix(&cfg.config_dir)
                        .unwrap_or(o)
                        .as_str()
                        .replace('\\', "/")
                })
                .collect(),
        }
    }

    pub fn output_paths(&self, cfg: &ResolvedConfig) -> Vec<Utf8PathBuf> {
        self.outputs.iter().map(|o| cfg.config_dir.join(o)).collect()
    }
}

/// SHA-256 over the tool version, the config text, the exemption file, and every root
/// file in order.
pub fn compute_signature(cfg: &ResolvedConfig, roots: &[Utf8PathBuf]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
    hash_file(&mut hasher, cfg.config_path.as_deref());
    hash_file(&mut hasher, cfg.exemption_config.as_deref());
    for name in cfg.rule_names() {
        hasher.update(name.as_bytes());
        hasher.update([0]);
    }
    for root in roots {
        hasher.update(root.as_str().as_bytes());
        hash_file(&mut hasher, Some(root));
    }
    hex::encode(hasher.finalize())
}

fn hash_file(hasher: &mut Sha256, path: Option<&Utf8Path>) {
    hasher.update([0]);
    if let Some(bytes) = path.and_then(|p| std::fs::read(p).ok()) {
        hasher.update(&bytes);
    }
    hasher.update([0]);
}

/// The recorded build info, if present and readable.
pub fn read(cfg: &ResolvedConfig) -> Option<BuildInfo> {
    let text = std::fs::read_to_string(&cfg.build_info_path).ok()?;
    match serde_json::from_str(&text) {
        Ok(info) => Some(info),
        Err(err) => {
            tracing::debug!(path = %cfg.build_info_path, error = %err, "ignoring unreadable build info");
            None
        }
    }
}

pub fn write(cfg: &ResolvedConfig, info: &BuildInfo) -> anyhow::Result<()> {
    let path = &cfg.build_info_path;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    let json = serde_json::to_string_pretty(info).context("serialize build info")?;
    std::fs::write(path, json).with_context(|| format!("write {path}"))
}

pub fn is_up_to_date(cfg: &ResolvedConfig, signature: &str) -> bool {
    let Some(info) = read(cfg) else {
        return false;
    };
    info.signature == signature && info.output_paths(cfg).iter().all(|p| p.exists())
}

/// Remove recorded outputs and the build info itself. Returns the files removed.
pub fn clean(cfg: &ResolvedConfig) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut removed = Vec::new();
    if let Some(info) = read(cfg) {
        for out in info.output_paths(cfg) {
            remove_if_present(&out, &mut removed)?;
        }
    }
    remove_if_present(&cfg.build_info_path, &mut removed)?;
    Ok(removed)
}

fn remove_if_present(path: &Utf8Path, removed: &mut Vec<Utf8PathBuf>) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            removed.push(path.to_path_buf());
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("remove {path}")),
    }
}
