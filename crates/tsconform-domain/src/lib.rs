//! Pure conformance evaluation (no IO).
//!
//! Input: a fully type-checked program tree loaded elsewhere, a rule catalog, and an
//! exemption list.
//! Output: compiler diagnostics merged with conformance diagnostics.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod checker;
pub mod exemption;
pub mod fix;
pub mod model;
pub mod rule;
pub mod rules;
pub mod sink;

mod fingerprint;
mod pass;

#[cfg(test)]
mod test_support;

pub use catalog::{RuleDescriptor, RuleFactory, builtin_rules, find_rule};
pub use checker::{Checker, CheckerError, Finding, HandlerContext};
pub use exemption::{ExemptionEntry, ExemptionError, ExemptionList, Exemptions};
pub use model::{Node, NodeKind, Program, SourceFile, TypeInfo};
pub use pass::{ConformanceError, run_conformance};
pub use rule::{Rule, RuleError, RuleId};
pub use sink::{SinkConfig, SinkConfigError, TrustedTypeKind};
