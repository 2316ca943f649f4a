use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Diagnostic category, mirroring the compiler's own categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Error,
    Warning,
    Suggestion,
    Message,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Error => "error",
            Category::Warning => "warning",
            Category::Suggestion => "suggestion",
            Category::Message => "message",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiagnosticLocation {
    pub path: RepoPath,
    /// Byte offset of the first character.
    pub start: u32,
    pub length: u32,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub col: u32,
}

/// The uniform diagnostic shape.
///
/// Compiler-native and conformance diagnostics share this type; the only
/// origin marker is `rule`, which is `None` for compiler output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostic {
    pub category: Category,
    pub code: u32,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<DiagnosticLocation>,

    /// Name of the conformance rule that produced this diagnostic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Stable identity for baselining conformance output across runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl Diagnostic {
    /// An error with no source location (config, IO, and build-level problems).
    pub fn global_error(code: u32, message: impl Into<String>) -> Self {
        Self {
            category: Category::Error,
            code,
            message: message.into(),
            location: None,
            rule: None,
            fingerprint: None,
        }
    }

    pub fn with_location(mut self, location: DiagnosticLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_conformance(&self) -> bool {
        self.rule.is_some()
    }
}
