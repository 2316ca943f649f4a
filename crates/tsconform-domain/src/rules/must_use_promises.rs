use crate::checker::{Checker, CheckerError, HandlerContext};
use crate::exemption::{ExemptionEntry, Exemptions};
use crate::model::{Node, NodeKind};
use crate::rule::{Rule, RuleError, RuleId};
use crate::rules::utils::{is_promise_like, require_child};
use tsconform_types::ids;

/// A call whose promise is dropped on the floor hides rejections.
#[derive(Clone, Debug)]
pub struct MustUsePromises {
    exemptions: Exemptions,
}

const ID: RuleId = RuleId {
    name: ids::RULE_MUST_USE_PROMISES,
    code: ids::CODE_MUST_USE_PROMISES,
};

impl MustUsePromises {
    pub fn new(entries: Vec<ExemptionEntry>) -> Self {
        Self {
            exemptions: Exemptions::new(entries),
        }
    }

    fn check(&self, cx: &mut HandlerContext<'_>, node: &Node) -> Result<(), RuleError> {
        let expr = require_child(cx, node, 0, "expression")?;
        // Awaited and `void` expressions have their own node kinds and never land here.
        if expr.kind != NodeKind::CallExpression {
            return Ok(());
        }
        if !expr.ty.as_ref().is_some_and(is_promise_like) {
            return Ok(());
        }
        if self.exemptions.is_exempt(&cx.file_path()) {
            return Ok(());
        }
        cx.add_failure(
            expr,
            "All Promises in async functions must either be awaited or used in an expression. \
             Prefix the call with `void` to discard the result deliberately.",
            Vec::new(),
        );
        Ok(())
    }
}

impl Rule for MustUsePromises {
    fn id(&self) -> RuleId {
        ID
    }

    fn register(&self, checker: &mut Checker<'_>) -> Result<(), CheckerError> {
        let rule = self.clone();
        checker.on(NodeKind::ExpressionStatement, ID, move |cx, node| rule.check(cx, node))
    }
}
