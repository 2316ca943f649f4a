use anyhow::Context;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use tsconform_settings::{ResolvedConfig, parse_tsconfig, resolve_config};
use tsconform_types::RepoPath;
use walkdir::WalkDir;

pub const CONFIG_FILE_NAME: &str = "tsconfig.json";

/// A project argument names either a directory holding `tsconfig.json` or a config file.
pub fn locate_config(project: &Utf8Path) -> Utf8PathBuf {
    if project.is_dir() {
        project.join(CONFIG_FILE_NAME)
    } else {
        project.to_path_buf()
    }
}

/// Read, parse, and resolve one config file.
pub fn load_config(config_path: &Utf8Path) -> anyhow::Result<ResolvedConfig> {
    let text = std::fs::read_to_string(config_path)
        .with_context(|| format!("Cannot read file '{config_path}'"))?;
    let cfg = parse_tsconfig(&text).with_context(|| format!("Failed to parse '{config_path}'"))?;
    resolve_config(cfg, config_path).with_context(|| format!("Invalid config '{config_path}'"))
}

/// Root files of a project, in a stable order.
///
/// Explicit `files` are returned as listed. Otherwise the config directory is walked and
/// every file matching `include` and not matching `exclude` is returned, sorted by
/// project-relative path.
pub fn discover_root_files(cfg: &ResolvedConfig) -> Vec<Utf8PathBuf> {
    if let Some(files) = &cfg.files {
        return files.clone();
    }

    let mut out: Vec<(RepoPath, Utf8PathBuf)> = WalkDir::new(&cfg.config_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .filter_map(|abs| {
            let rel = RepoPath::relative_to(&cfg.config_dir, &abs);
            let keep = cfg.include.is_match(rel.as_str()) && !cfg.exclude.is_match(rel.as_str());
            keep.then_some((rel, abs))
        })
        .collect();

    out.sort();
    out.dedup();
    tracing::debug!(dir = %cfg.config_dir, files = out.len(), "discovered root files");
    out.into_iter().map(|(_, abs)| abs).collect()
}

/// Lexically resolve `.` and `..` so the same project reached by two routes compares equal.
pub fn normalize_path(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Utf8Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_str()),
        }
    }
    out
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
