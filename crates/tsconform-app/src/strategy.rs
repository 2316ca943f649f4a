use crate::report::build_report;
use time::OffsetDateTime;
use tsconform_types::{BuildModeName, Diagnostic, TsconformReport};

/// Shown after the compiler's diagnostics when a solution build fails.
pub const BUILD_FAILED_NOTICE: &str = "Build failed; conformance checks were not run.";

/// What one orchestration run produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub notice: Option<String>,
    /// The underlying build failed before conformance could run.
    pub build_failed: bool,
}

impl BuildOutcome {
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            ..Self::default()
        }
    }

    pub fn build_failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            notice: Some(BUILD_FAILED_NOTICE.to_string()),
            build_failed: true,
        }
    }

    /// 0 iff nothing was reported and the build itself succeeded.
    pub fn exit_code(&self) -> i32 {
        if self.build_failed || !self.diagnostics.is_empty() {
            1
        } else {
            0
        }
    }
}

/// One way of producing programs and running the conformance pass over them.
///
/// Errors are reserved for defects (a rule tripping over a malformed tree, IO the run
/// cannot continue without). Everything a user should see comes back as diagnostics.
pub trait BuildStrategy {
    fn mode(&self) -> BuildModeName;

    fn run(&self) -> anyhow::Result<BuildOutcome>;
}

/// Run `strategy` and wrap the result in a report envelope.
pub fn run_build(strategy: &dyn BuildStrategy) -> anyhow::Result<TsconformReport> {
    let started_at = OffsetDateTime::now_utc();
    let outcome = strategy.run()?;
    let finished_at = OffsetDateTime::now_utc();
    Ok(build_report(
        strategy.mode(),
        started_at,
        finished_at,
        outcome,
    ))
}
