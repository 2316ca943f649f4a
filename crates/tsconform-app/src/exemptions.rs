use tsconform_settings::{ParsedExemptions, ResolvedConfig, parse_exemptions};
use tsconform_types::{Diagnostic, RepoPath, ids};

/// Load the project's exemption file, if it names one.
///
/// A missing or unreadable file is reported as a diagnostic and treated as empty.
pub fn load_exemptions(cfg: &ResolvedConfig) -> ParsedExemptions {
    let Some(path) = &cfg.exemption_config else {
        return ParsedExemptions::default();
    };
    let shown = RepoPath::relative_to(&cfg.config_dir, path);
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let parsed = parse_exemptions(&shown, &text);
            tracing::debug!(
                file = %shown,
                rules = parsed.list.rule_names().count(),
                problems = parsed.diagnostics.len(),
                "loaded exemptions"
            );
            parsed
        }
        Err(err) => ParsedExemptions::failed(Diagnostic::global_error(
            ids::CODE_EXEMPTION_CONFIG,
            format!("Cannot read exemption config '{shown}': {err}."),
        )),
    }
}
