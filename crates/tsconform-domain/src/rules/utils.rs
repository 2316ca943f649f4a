use crate::checker::HandlerContext;
use crate::model::{Node, TypeInfo};
use crate::rule::RuleError;

pub fn require_child<'n>(
    cx: &HandlerContext<'_>,
    node: &'n Node,
    index: usize,
    expected: &'static str,
) -> Result<&'n Node, RuleError> {
    node.child(index).ok_or_else(|| cx.malformed(node, expected))
}

pub fn is_assignment(node: &Node) -> bool {
    node.operator.as_deref() == Some("=")
}

/// Declared by the standard library as the global `Promise`.
pub fn is_promise_like(ty: &TypeInfo) -> bool {
    ty.constituents().any(|t| {
        if t.declarations.is_empty() {
            return t.name == "Promise" || t.name.starts_with("Promise<");
        }
        t.declarations.iter().any(|d| {
            d.qualified_name == "Promise" && lib_file_name(&d.file).is_some_and(is_standard_lib)
        })
    })
}

fn lib_file_name(path: &str) -> Option<&str> {
    path.rsplit(['/', '\\']).next()
}

fn is_standard_lib(file_name: &str) -> bool {
    file_name.starts_with("lib.") && file_name.ends_with(".d.ts")
}
