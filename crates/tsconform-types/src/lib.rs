//! Stable DTOs and IDs used across the tsconform workspace.
//!
//! This crate is intentionally boring:
//! - the uniform diagnostic shape shared by compiler and conformance output
//! - stable rule names and diagnostic codes
//! - canonical project-relative path handling
//! - the JSON report envelope

#![forbid(unsafe_code)]

pub mod diagnostic;
pub mod ids;
pub mod path;
pub mod receipt;

pub use diagnostic::{Category, Diagnostic, DiagnosticLocation};
pub use path::RepoPath;
pub use receipt::{
    BuildModeName, DiagnosticCounts, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, TsconformReport,
};
