use crate::checker::{Checker, CheckerError, HandlerContext};
use crate::exemption::{ExemptionEntry, Exemptions};
use crate::model::{Node, NodeKind, TypeInfo};
use crate::rule::{Rule, RuleError, RuleId};
use crate::rules::utils::{is_assignment, require_child};
use crate::sink::TrustedTypeKind;
use tsconform_types::ids;

/// Bans plain strings flowing into a location that requires a trusted-value type.
///
/// A sink is recognized from the type the context expects (the assignment target's
/// declared type, a parameter type, or a variable annotation).
#[derive(Clone, Debug)]
pub struct TrustedSinkRule {
    id: RuleId,
    kind: TrustedTypeKind,
    exemptions: Exemptions,
}

impl TrustedSinkRule {
    pub fn new(kind: TrustedTypeKind, entries: Vec<ExemptionEntry>) -> Self {
        let id = match kind {
            TrustedTypeKind::Html => RuleId {
                name: ids::RULE_TRUSTED_HTML_SINK,
                code: ids::CODE_TRUSTED_HTML_SINK,
            },
            TrustedTypeKind::Script => RuleId {
                name: ids::RULE_TRUSTED_SCRIPT_SINK,
                code: ids::CODE_TRUSTED_SCRIPT_SINK,
            },
            TrustedTypeKind::ScriptUrl => RuleId {
                name: ids::RULE_TRUSTED_SCRIPT_URL_SINK,
                code: ids::CODE_TRUSTED_SCRIPT_URL_SINK,
            },
        };
        Self {
            id,
            kind,
            exemptions: Exemptions::new(entries),
        }
    }

    pub fn html(entries: Vec<ExemptionEntry>) -> Self {
        Self::new(TrustedTypeKind::Html, entries)
    }

    pub fn script(entries: Vec<ExemptionEntry>) -> Self {
        Self::new(TrustedTypeKind::Script, entries)
    }

    pub fn script_url(entries: Vec<ExemptionEntry>) -> Self {
        Self::new(TrustedTypeKind::ScriptUrl, entries)
    }

    fn check_assignment(&self, cx: &mut HandlerContext<'_>, node: &Node) -> Result<(), RuleError> {
        if !is_assignment(node) {
            return Ok(());
        }
        let target = require_child(cx, node, 0, "assignment target")?;
        let value = require_child(cx, node, 1, "assigned value")?;
        self.check_value(cx, value, target.ty.as_ref());
        Ok(())
    }

    fn check_arguments(&self, cx: &mut HandlerContext<'_>, node: &Node) -> Result<(), RuleError> {
        require_child(cx, node, 0, "callee")?;
        for arg in node.arguments() {
            self.check_value(cx, arg, None);
        }
        Ok(())
    }

    fn check_initializer(&self, cx: &mut HandlerContext<'_>, node: &Node) -> Result<(), RuleError> {
        let name = require_child(cx, node, 0, "declared name")?;
        if let Some(init) = node.child(1) {
            self.check_value(cx, init, name.ty.as_ref());
        }
        Ok(())
    }

    fn check_value(&self, cx: &mut HandlerContext<'_>, value: &Node, declared: Option<&TypeInfo>) {
        let Some(expected) = value.contextual_type.as_ref().or(declared) else {
            return;
        };
        let sink = self.kind.sink();
        if !sink.appears_in(expected) {
            return;
        }
        let Some(actual) = value.ty.as_ref() else {
            return;
        };
        if !actual.is_string_like() || sink.appears_in(actual) {
            return;
        }
        if self.exemptions.is_exempt(&cx.file_path()) {
            tracing::debug!(rule = self.id.name, file = %cx.file_path(), "violation exempted");
            return;
        }
        let type_name = self.kind.type_name();
        cx.add_failure(
            value,
            format!(
                "Assigning a plain string to a sink that requires {type_name} is unsafe. \
                 Create the value through a Trusted Types policy instead."
            ),
            Vec::new(),
        );
    }
}

impl Rule for TrustedSinkRule {
    fn id(&self) -> RuleId {
        self.id
    }

    fn register(&self, checker: &mut Checker<'_>) -> Result<(), CheckerError> {
        let rule = self.clone();
        checker.on(NodeKind::BinaryExpression, self.id, move |cx, node| {
            rule.check_assignment(cx, node)
        })?;
        for kind in [NodeKind::CallExpression, NodeKind::NewExpression] {
            let rule = self.clone();
            checker.on(kind, self.id, move |cx, node| rule.check_arguments(cx, node))?;
        }
        let rule = self.clone();
        checker.on(NodeKind::VariableDeclaration, self.id, move |cx, node| {
            rule.check_initializer(cx, node)
        })
    }
}
