use crate::{Category, Diagnostic};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for tsconform reports.
pub const SCHEMA_REPORT_V1: &str = "tsconform.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BuildModeName {
    Direct,
    Build,
}

/// Diagnostic totals split by origin.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiagnosticCounts {
    pub compiler: u32,
    pub conformance: u32,
    pub errors: u32,
    pub total: u32,
}

impl DiagnosticCounts {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut counts = DiagnosticCounts::default();
        for d in diagnostics {
            if d.is_conformance() {
                counts.conformance += 1;
            } else {
                counts.compiler += 1;
            }
            if d.category == Category::Error {
                counts.errors += 1;
            }
            counts.total += 1;
        }
        counts
    }
}

/// A generic report envelope.
///
/// Keeping this generic allows embedding mode-specific data while the outer shape stays stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = DiagnosticCounts> {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub mode: BuildModeName,
    pub exit_code: i32,
    /// Set when the underlying build failed and conformance did not run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub data: TData,
}

pub type TsconformReport = ReportEnvelope<DiagnosticCounts>;
