use crate::catalog::RuleDescriptor;
use crate::checker::{Checker, CheckerError, Finding};
use crate::exemption::ExemptionList;
use crate::fingerprint::fingerprint_for_finding;
use crate::fix::render_fixes;
use crate::model::{LineMap, Program, SourceFile};
use crate::rule::RuleError;
use std::collections::BTreeSet;
use tsconform_types::{Diagnostic, DiagnosticLocation};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConformanceError {
    #[error("rule '{0}' appears more than once in the enabled rule list")]
    DuplicateRule(&'static str),
    #[error(transparent)]
    Checker(#[from] CheckerError),
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Run every enabled rule over `program` and merge the result with the compiler's own
/// pre-emit diagnostics.
///
/// Compiler diagnostics come first, then conformance diagnostics file by file in root
/// order. Nothing is deduplicated. A rule defect aborts the whole pass.
pub fn run_conformance(
    program: &Program,
    rules: &[RuleDescriptor],
    exemptions: &ExemptionList,
) -> Result<Vec<Diagnostic>, ConformanceError> {
    let mut seen = BTreeSet::new();
    for desc in rules {
        if !seen.insert(desc.name) {
            return Err(ConformanceError::DuplicateRule(desc.name));
        }
    }

    let mut diagnostics = program.pre_emit_diagnostics();

    let mut checker = Checker::new(program);
    for desc in rules {
        let entries = exemptions.entries_for(desc.name).to_vec();
        tracing::debug!(rule = desc.name, exemptions = entries.len(), "registering rule");
        let rule = desc.instantiate(entries);
        rule.register(&mut checker)?;
    }

    for file in program.source_files() {
        if file.is_declaration() {
            continue;
        }
        let findings = checker.execute(file)?;
        if findings.is_empty() {
            continue;
        }
        let lines = file.line_map();
        diagnostics.extend(findings.into_iter().map(|f| to_diagnostic(f, file, &lines)));
    }

    Ok(diagnostics)
}

fn to_diagnostic(finding: Finding, file: &SourceFile, lines: &LineMap) -> Diagnostic {
    let (line, col) = lines.line_col(&file.text, finding.start);
    let mut message = finding.message;
    if let Some(fixes) = render_fixes(&finding.fixes, file, lines) {
        message.push('\n');
        message.push_str(&fixes);
    }
    let fingerprint =
        fingerprint_for_finding(finding.rule.name, finding.file.as_str(), line, col, &message);
    Diagnostic {
        category: finding.category,
        code: finding.rule.code,
        message,
        location: Some(DiagnosticLocation {
            path: finding.file,
            start: finding.start,
            length: finding.end.saturating_sub(finding.start),
            line,
            col,
        }),
        rule: Some(finding.rule.name.to_string()),
        fingerprint: Some(fingerprint),
    }
}
