//! Multi-project builds over `references`.

use crate::buildinfo::{self, BuildInfo};
use crate::discover::{discover_root_files, load_config, locate_config, normalize_path};
use crate::emit::emit;
use crate::load::load_program;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use tsconform_domain::Program;
use tsconform_settings::ResolvedConfig;
use tsconform_types::{Category, Diagnostic};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectStatus {
    Built,
    UpToDate,
    Failed,
    /// Not attempted because a referenced project failed.
    Skipped,
}

#[derive(Clone, Debug)]
pub struct ProjectOutcome {
    pub config_path: Utf8PathBuf,
    pub config_dir: Utf8PathBuf,
    pub status: ProjectStatus,
    /// Compiler and emit errors, with paths relative to `config_dir`.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone, Debug)]
pub struct SolutionOutcome {
    pub status: BuildStatus,
    pub projects: Vec<ProjectOutcome>,
}

impl SolutionOutcome {
    /// Diagnostics from every project that failed to build, in build order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.projects.iter().flat_map(|p| p.diagnostics.iter())
    }
}

/// Builds one root project and everything it references, dependencies first.
pub struct SolutionBuilder {
    root: Utf8PathBuf,
}

impl SolutionBuilder {
    pub fn new(project: &Utf8Path) -> Self {
        Self {
            root: normalize_path(&locate_config(project)),
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Every project in build order. Reference cycles are rejected.
    pub fn projects(&self) -> anyhow::Result<Vec<ResolvedConfig>> {
        let mut order = Vec::new();
        let mut done = BTreeSet::new();
        let mut visiting = Vec::new();
        visit(&self.root, &mut visiting, &mut done, &mut order)?;
        Ok(order)
    }

    /// Delete build info and outputs for every project in the solution.
    pub fn clean(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let mut removed = Vec::new();
        for cfg in self.projects()? {
            removed.extend(buildinfo::clean(&cfg)?);
        }
        tracing::info!(root = %self.root, files = removed.len(), "cleaned solution");
        Ok(removed)
    }

    /// Build every out-of-date project, calling `post_emit` after each successful emit.
    ///
    /// An error from `post_emit` aborts the whole build.
    pub fn build<F>(&self, mut post_emit: F) -> anyhow::Result<SolutionOutcome>
    where
        F: FnMut(&ResolvedConfig, &Program) -> anyhow::Result<()>,
    {
        let projects = self.projects()?;
        let mut failed: BTreeSet<Utf8PathBuf> = BTreeSet::new();
        let mut outcome = SolutionOutcome {
            status: BuildStatus::Success,
            projects: Vec::with_capacity(projects.len()),
        };

        for cfg in &projects {
            let config_path = project_key(cfg);
            let blocked = cfg
                .references
                .iter()
                .any(|r| failed.contains(&normalize_path(&locate_config(r))));

            let mut diagnostics = Vec::new();
            let status = if blocked {
                tracing::info!(project = %config_path, "skipping project: a dependency failed");
                ProjectStatus::Skipped
            } else {
                build_project(cfg, &mut diagnostics, &mut post_emit)?
            };

            if matches!(status, ProjectStatus::Failed | ProjectStatus::Skipped) {
                failed.insert(config_path.clone());
                outcome.status = BuildStatus::Failed;
            }
            outcome.projects.push(ProjectOutcome {
                config_path,
                config_dir: cfg.config_dir.clone(),
                status,
                diagnostics,
            });
        }
        Ok(outcome)
    }
}

fn project_key(cfg: &ResolvedConfig) -> Utf8PathBuf {
    cfg.config_path
        .as_deref()
        .map(normalize_path)
        .unwrap_or_else(|| cfg.config_dir.clone())
}

fn visit(
    config_path: &Utf8Path,
    visiting: &mut Vec<Utf8PathBuf>,
    done: &mut BTreeSet<Utf8PathBuf>,
    order: &mut Vec<ResolvedConfig>,
) -> anyhow::Result<()> {
    if done.contains(config_path) {
        return Ok(());
    }
    if visiting.iter().any(|p| p == config_path) {
        let chain: Vec<&str> = visiting.iter().map(|p| p.as_str()).collect();
        anyhow::bail!(
            "Project references may not form a circular graph. Cycle detected: {} -> {config_path}",
            chain.join(" -> ")
        );
    }

    let cfg = load_config(config_path)?;
    visiting.push(config_path.to_path_buf());
    for reference in &cfg.references {
        let child = normalize_path(&locate_config(reference));
        visit(&child, visiting, done, order)
            .with_context(|| format!("referenced from {config_path}"))?;
    }
    visiting.pop();

    done.insert(config_path.to_path_buf());
    order.push(cfg);
    Ok(())
}

fn build_project<F>(
    cfg: &ResolvedConfig,
    diagnostics: &mut Vec<Diagnostic>,
    post_emit: &mut F,
) -> anyhow::Result<ProjectStatus>
where
    F: FnMut(&ResolvedConfig, &Program) -> anyhow::Result<()>,
{
    let roots = discover_root_files(cfg);
    let signature = buildinfo::compute_signature(cfg, &roots);
    if buildinfo::is_up_to_date(cfg, &signature) {
        tracing::info!(project = %cfg.config_dir, "project is up to date");
        return Ok(ProjectStatus::UpToDate);
    }

    tracing::info!(project = %cfg.config_dir, files = roots.len(), "building project");
    let program = load_program(&cfg.config_dir, &roots);
    let pre_emit: Vec<Diagnostic> = program.pre_emit_diagnostics();
    if pre_emit.iter().any(|d| d.category == Category::Error) {
        diagnostics.extend(pre_emit);
        return Ok(ProjectStatus::Failed);
    }

    let emitted = emit(cfg, &program, false);
    if !emitted.diagnostics.is_empty() {
        diagnostics.extend(emitted.diagnostics);
        return Ok(ProjectStatus::Failed);
    }

    post_emit(cfg, &program)?;

    buildinfo::write(cfg, &BuildInfo::new(cfg, signature, &emitted.emitted))?;
    Ok(ProjectStatus::Built)
}
