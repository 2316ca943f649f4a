use crate::checker::{Checker, CheckerError, HandlerContext};
use crate::exemption::{ExemptionEntry, Exemptions};
use crate::fix::Fix;
use crate::model::{Node, NodeKind};
use crate::rule::{Rule, RuleError, RuleId};
use crate::rules::utils::require_child;
use tsconform_types::ids;

/// `new Set("abc")` builds a set of characters, which is almost never intended.
#[derive(Clone, Debug)]
pub struct BanStringInitializedSets {
    exemptions: Exemptions,
}

const ID: RuleId = RuleId {
    name: ids::RULE_BAN_STRING_INITIALIZED_SETS,
    code: ids::CODE_BAN_STRING_INITIALIZED_SETS,
};

impl BanStringInitializedSets {
    pub fn new(entries: Vec<ExemptionEntry>) -> Self {
        Self {
            exemptions: Exemptions::new(entries),
        }
    }

    fn check(&self, cx: &mut HandlerContext<'_>, node: &Node) -> Result<(), RuleError> {
        let callee = require_child(cx, node, 0, "constructor")?;
        if !callee.is_identifier("Set") {
            return Ok(());
        }
        let Some(arg) = node.arguments().first() else {
            return Ok(());
        };
        if !arg.ty.as_ref().is_some_and(|t| t.is_string_like()) {
            return Ok(());
        }
        if self.exemptions.is_exempt(&cx.file_path()) {
            return Ok(());
        }

        let fix = Fix::replace(arg.pos, arg.end, format!("[{}]", cx.node_text(arg).trim()));
        cx.add_failure(
            arg,
            "Value passed to the Set constructor is a string, so the Set will hold its \
             characters rather than the string itself. Wrap the value in an array to store \
             the whole string.",
            vec![fix],
        );
        Ok(())
    }
}

impl Rule for BanStringInitializedSets {
    fn id(&self) -> RuleId {
        ID
    }

    fn register(&self, checker: &mut Checker<'_>) -> Result<(), CheckerError> {
        let rule = self.clone();
        checker.on(NodeKind::NewExpression, ID, move |cx, node| rule.check(cx, node))
    }
}
