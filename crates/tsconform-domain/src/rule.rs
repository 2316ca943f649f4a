//! The contract between the checker and pluggable rules.

use crate::checker::{Checker, CheckerError};
use crate::model::NodeKind;

/// Stable identity of a rule: the exemption key and the diagnostic code it reports under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleId {
    pub name: &'static str,
    pub code: u32,
}

/// A self-registering unit of analysis.
///
/// Rules never walk the tree themselves. `register` attaches handlers to the shared
/// [`Checker`], which owns iteration and calls each handler once per matching node.
pub trait Rule {
    fn id(&self) -> RuleId;

    fn register(&self, checker: &mut Checker<'_>) -> Result<(), CheckerError>;
}

/// A handler reached a node whose shape breaks the typed-tree contract.
///
/// These are defects, not findings: they abort the whole conformance pass.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule {rule}: {kind:?} at {file}:{pos} is missing its {expected}")]
    MalformedNode {
        rule: &'static str,
        file: String,
        kind: NodeKind,
        pos: u32,
        expected: &'static str,
    },
}
