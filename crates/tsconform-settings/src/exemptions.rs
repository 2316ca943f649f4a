//! Exemption file parsing.
//!
//! Failures degrade toward stricter behavior: a broken file yields no exemptions, a
//! broken rule key yields no exemptions for that rule.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tsconform_domain::{ExemptionEntry, ExemptionList, find_rule};
use tsconform_types::{Diagnostic, DiagnosticLocation, RepoPath, ids};

/// Exemption file schema v1: rule name to one entry or a list of entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ExemptionFileV1(pub BTreeMap<String, ExemptionValue>);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ExemptionValue {
    One(ExemptionEntryConfig),
    Many(Vec<ExemptionEntryConfig>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExemptionEntryConfig {
    /// Why these call sites are tolerated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Globs over project-relative paths. `*` never crosses `/`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    /// Directory prefixes, matched at path-segment boundaries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,

    /// Regular expressions over project-relative paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regexps: Vec<String>,
}

impl ExemptionValue {
    pub fn into_entries(self) -> Vec<ExemptionEntryConfig> {
        match self {
            ExemptionValue::One(e) => vec![e],
            ExemptionValue::Many(v) => v,
        }
    }
}

/// The loaded list plus every problem found on the way.
#[derive(Clone, Debug, Default)]
pub struct ParsedExemptions {
    pub list: ExemptionList,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedExemptions {
    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            list: ExemptionList::empty(),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub fn parse_exemptions(file: &RepoPath, input: &str) -> ParsedExemptions {
    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(input) {
        Ok(raw) => raw,
        Err(err) => {
            let offset = offset_of(input, err.line(), err.column());
            return ParsedExemptions::failed(exemption_diagnostic(
                file,
                input,
                offset,
                format!("Failed to parse exemption config: {err}"),
            ));
        }
    };

    let mut out = ParsedExemptions::default();
    for (rule, value) in raw {
        if find_rule(&rule).is_none() {
            tracing::warn!(rule = %rule, file = %file, "exemption key names an unknown rule");
        }
        match build_entries(&rule, value) {
            Ok(entries) => {
                for entry in entries {
                    out.list.insert(rule.clone(), entry);
                }
            }
            Err(message) => {
                let offset = key_offset(input, &rule);
                out.diagnostics.push(match offset {
                    Some(offset) => exemption_diagnostic(file, input, offset, message),
                    None => Diagnostic::global_error(ids::CODE_EXEMPTION_CONFIG, message),
                });
            }
        }
    }
    out
}

fn build_entries(rule: &str, value: serde_json::Value) -> Result<Vec<ExemptionEntry>, String> {
    let value: ExemptionValue = serde_json::from_value(value).map_err(|_| {
        format!(
            "Invalid exemption for rule '{rule}': expected an entry object or an array of \
             entries with 'reason', 'paths', 'prefixes', or 'regexps'."
        )
    })?;
    value
        .into_entries()
        .into_iter()
        .map(|cfg| {
            ExemptionEntry::new(cfg.reason, &cfg.paths, &cfg.prefixes, &cfg.regexps)
                .map_err(|err| format!("Invalid exemption for rule '{rule}': {err}"))
        })
        .collect()
}

fn exemption_diagnostic(file: &RepoPath, input: &str, offset: u32, message: String) -> Diagnostic {
    let (line, col) = line_col(input, offset);
    Diagnostic::global_error(ids::CODE_EXEMPTION_CONFIG, message).with_location(
        DiagnosticLocation {
            path: file.clone(),
            start: offset,
            length: 0,
            line,
            col,
        },
    )
}

/// Byte offset of a 1-based line/column as reported by the JSON parser.
fn offset_of(input: &str, line: usize, column: usize) -> u32 {
    let line_start: usize = input
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let rest = &input[line_start.min(input.len())..];
    let col: usize = rest
        .chars()
        .take(column.saturating_sub(1))
        .map(char::len_utf8)
        .sum();
    (line_start + col) as u32
}

/// Byte offset of `rule` used as an object key: the quoted name followed by `:`.
fn key_offset(input: &str, rule: &str) -> Option<u32> {
    let needle = format!("\"{rule}\"");
    input
        .match_indices(&needle)
        .find(|(at, _)| {
            let escaped = input[..*at].ends_with('\\');
            let rest = input[at + needle.len()..].trim_start();
            !escaped && rest.starts_with(':')
        })
        .map(|(at, _)| at as u32)
}

fn line_col(input: &str, offset: u32) -> (u32, u32) {
    let before = input.get(..offset as usize).unwrap_or(input);
    let line = before.matches('\n').count() as u32 + 1;
    let col = before
        .rsplit('\n')
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0) as u32
        + 1;
    (line, col)
}
