use crate::exemption::{ExemptionEntry, ExemptionList};
use crate::model::{Node, NodeKind, Program, SourceFile, TypeDeclaration, TypeInfo, TypeKind};
use crate::sink::TrustedTypeKind;

pub fn ident(name: &str, pos: u32) -> Node {
    let mut n = Node::new(NodeKind::Identifier, pos, pos + name.len() as u32);
    n.text = Some(name.to_string());
    n
}

pub fn string_literal(value: &str, pos: u32, end: u32) -> Node {
    let mut n = Node::new(NodeKind::StringLiteral, pos, end);
    n.text = Some(value.to_string());
    n.ty = Some(string_literal_type(value));
    n
}

pub fn binary(op: &str, left: Node, right: Node) -> Node {
    let mut n = Node::new(NodeKind::BinaryExpression, left.pos, right.end);
    n.operator = Some(op.to_string());
    n.children = vec![left, right];
    n
}

pub fn call(callee: Node, args: Vec<Node>, end: u32) -> Node {
    let mut n = Node::new(NodeKind::CallExpression, callee.pos, end);
    n.children = std::iter::once(callee).chain(args).collect();
    n
}

pub fn new_expr(pos: u32, callee: Node, args: Vec<Node>, end: u32) -> Node {
    let mut n = Node::new(NodeKind::NewExpression, pos, end);
    n.children = std::iter::once(callee).chain(args).collect();
    n
}

pub fn expr_stmt(expression: Node, end: u32) -> Node {
    let mut n = Node::new(NodeKind::ExpressionStatement, expression.pos, end);
    n.children = vec![expression];
    n
}

pub fn typed(mut node: Node, ty: TypeInfo) -> Node {
    node.ty = Some(ty);
    node
}

pub fn expecting(mut node: Node, ty: TypeInfo) -> Node {
    node.contextual_type = Some(ty);
    node
}

pub fn string_type() -> TypeInfo {
    TypeInfo {
        name: "string".to_string(),
        kind: TypeKind::String,
        ..TypeInfo::default()
    }
}

pub fn string_literal_type(value: &str) -> TypeInfo {
    TypeInfo {
        name: format!("\"{value}\""),
        kind: TypeKind::StringLiteral,
        ..TypeInfo::default()
    }
}

pub fn trusted_type(kind: TrustedTypeKind) -> TypeInfo {
    TypeInfo {
        name: kind.type_name().to_string(),
        kind: TypeKind::Object,
        declarations: vec![TypeDeclaration {
            file: "/work/node_modules/@types/trusted-types/index.d.ts".to_string(),
            qualified_name: format!("global.{}", kind.type_name()),
        }],
        members: Vec::new(),
    }
}

pub fn promise_type() -> TypeInfo {
    TypeInfo {
        name: "Promise<void>".to_string(),
        kind: TypeKind::Object,
        declarations: vec![TypeDeclaration {
            file: "/work/node_modules/typescript/lib/lib.es5.d.ts".to_string(),
            qualified_name: "Promise".to_string(),
        }],
        members: Vec::new(),
    }
}

pub fn source_file(name: &str, text: &str, statements: Vec<Node>) -> SourceFile {
    SourceFile {
        file_name: name.to_string(),
        is_declaration_file: false,
        text: text.to_string(),
        diagnostics: Vec::new(),
        output: None,
        statements,
    }
}

pub fn program(files: Vec<SourceFile>) -> Program {
    Program::new(files, Vec::new())
}

pub fn exempt_paths(rule: &str, paths: &[&str]) -> ExemptionList {
    let paths: Vec<String> = paths.iter().map(|s| s.to_string()).collect();
    let mut list = ExemptionList::empty();
    list.insert(
        rule,
        ExemptionEntry::new(Some("test".to_string()), &paths, &[], &[])
            .expect("valid test globs"),
    );
    list
}

/// `el.innerHTML = 'x';` with the left side typed as a TrustedHTML sink.
pub fn html_sink_assignment(file_name: &str) -> SourceFile {
    let text = "el.innerHTML = 'x';";
    let mut target = Node::new(NodeKind::PropertyAccessExpression, 0, 12);
    target.ty = Some(trusted_type(TrustedTypeKind::Html));
    target.children = vec![ident("el", 0), ident("innerHTML", 3)];
    let assignment = binary("=", target, string_literal("x", 15, 18));
    source_file(file_name, text, vec![expr_stmt(assignment, 19)])
}
