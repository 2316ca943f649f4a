//! The shared single-pass dispatcher.
//!
//! Rules attach handlers keyed by node kind; the checker owns the one walk per file and
//! fans each node out to every matching handler in registration order.

use crate::fix::Fix;
use crate::model::{Node, NodeKind, Program, SourceFile};
use crate::rule::{RuleError, RuleId};
use std::collections::BTreeMap;
use tsconform_types::{Category, RepoPath};

type Handler = Box<dyn Fn(&mut HandlerContext<'_>, &Node) -> Result<(), RuleError>>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckerError {
    #[error("rule {0} tried to register a handler after execution started")]
    RegistrationClosed(&'static str),
}

/// A raw violation reported by a rule handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub rule: RuleId,
    pub file: RepoPath,
    pub start: u32,
    pub end: u32,
    pub category: Category,
    pub message: String,
    pub fixes: Vec<Fix>,
}

/// What a handler can see and do while visiting one node.
///
/// Handlers can only append findings under their own rule id; they never see what
/// other rules reported.
pub struct HandlerContext<'a> {
    program: &'a Program,
    file: &'a SourceFile,
    rule: RuleId,
    out: &'a mut Vec<Finding>,
}

impl HandlerContext<'_> {
    pub fn program(&self) -> &Program {
        self.program
    }

    pub fn source_file(&self) -> &SourceFile {
        self.file
    }

    pub fn file_path(&self) -> RepoPath {
        self.file.path()
    }

    pub fn node_text(&self, node: &Node) -> &str {
        self.file.slice(node.pos, node.end)
    }

    pub fn add_failure(&mut self, node: &Node, message: impl Into<String>, fixes: Vec<Fix>) {
        self.out.push(Finding {
            rule: self.rule,
            file: self.file.path(),
            start: node.pos,
            end: node.end,
            category: Category::Error,
            message: message.into(),
            fixes,
        });
    }

    pub fn malformed(&self, node: &Node, expected: &'static str) -> RuleError {
        RuleError::MalformedNode {
            rule: self.rule.name,
            file: self.file.file_name.clone(),
            kind: node.kind,
            pos: node.pos,
            expected,
        }
    }
}

struct Registration {
    rule: RuleId,
    handler: Handler,
}

pub struct Checker<'p> {
    program: &'p Program,
    registrations: Vec<Registration>,
    by_kind: BTreeMap<NodeKind, Vec<usize>>,
    sealed: bool,
}

impl<'p> Checker<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            registrations: Vec::new(),
            by_kind: BTreeMap::new(),
            sealed: false,
        }
    }

    /// Attach `handler` for every node of `kind`. Rejected once any file has been executed.
    pub fn on<F>(&mut self, kind: NodeKind, rule: RuleId, handler: F) -> Result<(), CheckerError>
    where
        F: Fn(&mut HandlerContext<'_>, &Node) -> Result<(), RuleError> + 'static,
    {
        if self.sealed {
            return Err(CheckerError::RegistrationClosed(rule.name));
        }
        let idx = self.registrations.len();
        self.registrations.push(Registration {
            rule,
            handler: Box::new(handler),
        });
        self.by_kind.entry(kind).or_default().push(idx);
        Ok(())
    }

    pub fn handler_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Walk `file` once and return its findings in source-position order.
    ///
    /// Declaration files are skipped without being walked.
    pub fn execute(&mut self, file: &SourceFile) -> Result<Vec<Finding>, RuleError> {
        self.sealed = true;
        let mut findings = Vec::new();
        if file.is_declaration() {
            tracing::debug!(file = %file.file_name, "skipping declaration file");
            return Ok(findings);
        }

        let mut stack: Vec<&Node> = file.statements.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if let Some(indices) = self.by_kind.get(&node.kind) {
                for &idx in indices {
                    let reg = &self.registrations[idx];
                    let mut cx = HandlerContext {
                        program: self.program,
                        file,
                        rule: reg.rule,
                        out: &mut findings,
                    };
                    (reg.handler)(&mut cx, node)?;
                }
            }
            stack.extend(node.children.iter().rev());
        }

        findings.sort_by_key(|f| (f.start, f.end));
        tracing::debug!(file = %file.file_name, findings = findings.len(), "executed checker");
        Ok(findings)
    }
}
