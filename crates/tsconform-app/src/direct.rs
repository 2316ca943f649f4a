use crate::conform::check_program;
use crate::strategy::{BuildOutcome, BuildStrategy};
use camino::Utf8PathBuf;
use tsconform_host::{discover_root_files, emit, load_config, load_program, locate_config};
use tsconform_settings::ResolvedConfig;
use tsconform_types::{BuildModeName, Diagnostic, ids};

/// A standard command line: explicit root files, or a project to load.
#[derive(Clone, Debug, Default)]
pub struct DirectInput {
    pub cwd: Utf8PathBuf,
    /// Typed-tree files named on the command line. They take precedence over `project`.
    pub files: Vec<Utf8PathBuf>,
    /// `-p`: a config file or a directory holding one. Defaults to `cwd`.
    pub project: Option<Utf8PathBuf>,
}

/// Single-program build: resolve config, check, then emit.
pub struct DirectBuild {
    input: DirectInput,
}

impl DirectBuild {
    pub fn new(input: DirectInput) -> Self {
        Self { input }
    }

    fn resolve_config(&self) -> anyhow::Result<ResolvedConfig> {
        let input = &self.input;
        if !input.files.is_empty() {
            return Ok(ResolvedConfig::for_root_files(&input.cwd, &input.files));
        }
        let project = match &input.project {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => input.cwd.join(p),
            None => input.cwd.clone(),
        };
        load_config(&locate_config(&project))
    }
}

impl BuildStrategy for DirectBuild {
    fn mode(&self) -> BuildModeName {
        BuildModeName::Direct
    }

    fn run(&self) -> anyhow::Result<BuildOutcome> {
        let cfg = match self.resolve_config() {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::info!("configuration error; nothing was checked");
                return Ok(BuildOutcome::from_diagnostics(vec![
                    Diagnostic::global_error(ids::CODE_CONFIG_ERROR, format!("{err:#}")),
                ]));
            }
        };

        let roots = discover_root_files(&cfg);
        tracing::info!(project = %cfg.config_dir, files = roots.len(), "checking program");
        let program = load_program(&cfg.config_dir, &roots);

        let mut diagnostics = check_program(&cfg, &program)?;

        // The emitter knows nothing about conformance findings.
        let disable = cfg.no_emit_on_error && !diagnostics.is_empty();
        if disable {
            tracing::info!("noEmitOnError: diagnostics present, emit disabled");
        }
        let emitted = emit(&cfg, &program, disable);
        diagnostics.extend(emitted.diagnostics);

        Ok(BuildOutcome::from_diagnostics(diagnostics))
    }
}

