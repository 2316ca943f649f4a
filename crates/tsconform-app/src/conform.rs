use crate::exemptions::load_exemptions;
use tsconform_domain::{ConformanceError, Program, run_conformance};
use tsconform_settings::ResolvedConfig;
use tsconform_types::{Diagnostic, ids};

/// Exemption diagnostics followed by the merged compiler and conformance diagnostics.
///
/// A duplicated rule name is a configuration problem and comes back as a diagnostic.
/// Rule defects are errors.
pub(crate) fn check_program(
    cfg: &ResolvedConfig,
    program: &Program,
) -> anyhow::Result<Vec<Diagnostic>> {
    let exemptions = load_exemptions(cfg);
    let mut diagnostics = exemptions.diagnostics;
    match run_conformance(program, &cfg.rules, &exemptions.list) {
        Ok(found) => diagnostics.extend(found),
        Err(err @ ConformanceError::DuplicateRule(_)) => {
            diagnostics.push(Diagnostic::global_error(
                ids::CODE_CONFIG_ERROR,
                err.to_string(),
            ));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err).context(format!(
                "conformance pass failed for project {}",
                cfg.config_dir
            )));
        }
    }
    tracing::debug!(
        project = %cfg.config_dir,
        diagnostics = diagnostics.len(),
        "conformance pass finished"
    );
    Ok(diagnostics)
}
