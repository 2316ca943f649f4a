use crate::checker::{Checker, CheckerError, HandlerContext};
use crate::exemption::{ExemptionEntry, Exemptions};
use crate::fix::Fix;
use crate::model::{Node, NodeKind};
use crate::rule::{Rule, RuleError, RuleId};
use crate::rules::utils::require_child;
use tsconform_types::ids;

/// Flags comparisons against `NaN`, which never hold.
#[derive(Clone, Debug)]
pub struct EqualsNan {
    exemptions: Exemptions,
}

const ID: RuleId = RuleId {
    name: ids::RULE_EQUALS_NAN,
    code: ids::CODE_EQUALS_NAN,
};

impl EqualsNan {
    pub fn new(entries: Vec<ExemptionEntry>) -> Self {
        Self {
            exemptions: Exemptions::new(entries),
        }
    }

    fn check(&self, cx: &mut HandlerContext<'_>, node: &Node) -> Result<(), RuleError> {
        let Some(op) = node.operator.as_deref() else {
            return Ok(());
        };
        let negated = match op {
            "==" | "===" => false,
            "!=" | "!==" => true,
            _ => return Ok(()),
        };
        let left = require_child(cx, node, 0, "left operand")?;
        let right = require_child(cx, node, 1, "right operand")?;
        let other = if right.is_identifier("NaN") {
            left
        } else if left.is_identifier("NaN") {
            right
        } else {
            return Ok(());
        };
        if self.exemptions.is_exempt(&cx.file_path()) {
            return Ok(());
        }

        let operand = cx.node_text(other).trim().to_string();
        let operand = if operand.is_empty() { "x".to_string() } else { operand };
        let (outcome, replacement) = if negated {
            ("true", format!("!isNaN({operand})"))
        } else {
            ("false", format!("isNaN({operand})"))
        };
        let message = format!(
            "{} is always {outcome}; use {replacement} instead.",
            cx.node_text(node).trim()
        );
        cx.add_failure(node, message, vec![Fix::replace(node.pos, node.end, replacement)]);
        Ok(())
    }
}

impl Rule for EqualsNan {
    fn id(&self) -> RuleId {
        ID
    }

    fn register(&self, checker: &mut Checker<'_>) -> Result<(), CheckerError> {
        let rule = self.clone();
        checker.on(NodeKind::BinaryExpression, ID, move |cx, node| rule.check(cx, node))
    }
}
