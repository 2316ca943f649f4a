use crate::conform::check_program;
use crate::strategy::{BuildOutcome, BuildStrategy};
use camino::{Utf8Path, Utf8PathBuf};
use tsconform_host::{BuildStatus, SolutionBuilder};
use tsconform_types::{BuildModeName, Diagnostic, RepoPath, ids};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("build mode supports exactly one project")]
    TooManyProjects(usize),
}

/// Incremental multi-project build with the conformance pass as a post-emit hook.
pub struct SolutionBuild {
    cwd: Utf8PathBuf,
    project: Utf8PathBuf,
}

impl SolutionBuild {
    /// Accepts zero or one project argument; zero means `cwd`.
    ///
    /// Rejected before anything touches the filesystem: the build cache cannot be
    /// invalidated for several roots at once.
    pub fn new(cwd: &Utf8Path, projects: &[String]) -> Result<Self, UsageError> {
        let project = match projects {
            [] => cwd.to_path_buf(),
            [one] => {
                let p = Utf8Path::new(one);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    cwd.join(p)
                }
            }
            many => return Err(UsageError::TooManyProjects(many.len())),
        };
        Ok(Self {
            cwd: cwd.to_path_buf(),
            project,
        })
    }

    pub fn project(&self) -> &Utf8Path {
        &self.project
    }
}

impl BuildStrategy for SolutionBuild {
    fn mode(&self) -> BuildModeName {
        BuildModeName::Build
    }

    fn run(&self) -> anyhow::Result<BuildOutcome> {
        let builder = SolutionBuilder::new(&self.project);

        // An up-to-date project skips emit, and with it the hook. Conformance has to
        // see every file, so the cache goes first.
        match builder.clean() {
            Ok(removed) => tracing::info!(files = removed.len(), "discarded build cache"),
            Err(err) => {
                return Ok(BuildOutcome::from_diagnostics(vec![
                    Diagnostic::global_error(ids::CODE_CONFIG_ERROR, format!("{err:#}")),
                ]));
            }
        }

        let mut found: Vec<Diagnostic> = Vec::new();
        let outcome = builder.build(|cfg, program| {
            let diagnostics = check_program(cfg, program)?;
            found.extend(rebase(diagnostics, &self.cwd, &cfg.config_dir));
            Ok(())
        })?;

        if outcome.status == BuildStatus::Failed {
            tracing::info!(
                projects = outcome.projects.len(),
                "underlying build failed; conformance results discarded"
            );
            let failures = outcome
                .projects
                .into_iter()
                .flat_map(|p| rebase(p.diagnostics, &self.cwd, &p.config_dir))
                .collect();
            return Ok(BuildOutcome::build_failed(failures));
        }
        Ok(BuildOutcome::from_diagnostics(found))
    }
}

/// Re-express project-relative locations relative to the invocation directory.
/// Fingerprints keep the project-relative path so baselines survive a change of `cwd`.
fn rebase(
    mut diagnostics: Vec<Diagnostic>,
    cwd: &Utf8Path,
    config_dir: &Utf8Path,
) -> Vec<Diagnostic> {
    for location in diagnostics.iter_mut().filter_map(|d| d.location.as_mut()) {
        let absolute = config_dir.join(location.path.as_str());
        location.path = RepoPath::relative_to(cwd, &absolute);
    }
    diagnostics
}
