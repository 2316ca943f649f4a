use crate::strategy::BuildOutcome;
use anyhow::Context;
use camino::Utf8Path;
use time::OffsetDateTime;
use tsconform_types::{
    BuildModeName, DiagnosticCounts, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, TsconformReport,
};

pub fn build_report(
    mode: BuildModeName,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
    outcome: BuildOutcome,
) -> TsconformReport {
    let exit_code = outcome.exit_code();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "tsconform".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        mode,
        exit_code,
        notice: outcome.notice,
        data: DiagnosticCounts::from_diagnostics(&outcome.diagnostics),
        diagnostics: outcome.diagnostics,
    }
}

pub fn serialize_report(report: &TsconformReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn write_report(path: &Utf8Path, report: &TsconformReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}
