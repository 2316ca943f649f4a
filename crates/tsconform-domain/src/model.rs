//! In-memory form of a fully type-checked program.
//!
//! The tree is produced by an external type-checker and is read-only for the whole
//! conformance run. Only the node kinds rules dispatch on are named; everything else
//! deserializes as [`NodeKind::Other`].

use serde::{Deserialize, Serialize};
use tsconform_types::{Category, Diagnostic, DiagnosticLocation, RepoPath};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    ExpressionStatement,
    VariableStatement,
    VariableDeclaration,
    BinaryExpression,
    CallExpression,
    NewExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    Identifier,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateExpression,
    NumericLiteral,
    AwaitExpression,
    VoidExpression,
    ArrowFunction,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    ModuleDeclaration,
    Block,
    ReturnStatement,
    IfStatement,
    #[serde(other)]
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    String,
    StringLiteral,
    TemplateLiteral,
    Number,
    Boolean,
    Union,
    Any,
    Unknown,
    #[default]
    #[serde(other)]
    Object,
}

/// Where a named type is declared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    /// Absolute path of the declaring file.
    pub file: String,
    pub qualified_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    /// Display text, e.g. `string` or `Promise<void>`.
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declarations: Vec<TypeDeclaration>,
    /// Union constituents when `kind` is `union`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<TypeInfo>,
}

impl TypeInfo {
    pub fn is_string_like(&self) -> bool {
        match self.kind {
            TypeKind::String | TypeKind::StringLiteral | TypeKind::TemplateLiteral => true,
            TypeKind::Union => {
                !self.members.is_empty() && self.members.iter().all(TypeInfo::is_string_like)
            }
            _ => false,
        }
    }

    /// The union members, or the type itself when it is not a union.
    pub fn constituents(&self) -> Box<dyn Iterator<Item = &TypeInfo> + '_> {
        if self.kind == TypeKind::Union {
            Box::new(self.members.iter().flat_map(TypeInfo::constituents))
        } else {
            Box::new(std::iter::once(self))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub kind: NodeKind,
    pub pos: u32,
    pub end: u32,
    /// Identifier name or literal value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Operator token for binary expressions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeInfo>,
    /// The type the surrounding context expects this node to have.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contextual_type: Option<TypeInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            pos,
            end,
            text: None,
            operator: None,
            ty: None,
            contextual_type: None,
            children: Vec::new(),
        }
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Call and `new` arguments (everything after the callee).
    pub fn arguments(&self) -> &[Node] {
        self.children.get(1..).unwrap_or(&[])
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        self.kind == NodeKind::Identifier && self.text.as_deref() == Some(name)
    }

    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }
}

/// A diagnostic the type-checker attached to a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiagnostic {
    #[serde(default = "default_category")]
    pub category: Category,
    pub code: u32,
    pub message: String,
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub length: Option<u32>,
}

fn default_category() -> Category {
    Category::Error
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    /// Project-relative name of the TypeScript source file.
    pub file_name: String,
    #[serde(default)]
    pub is_declaration_file: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<FileDiagnostic>,
    /// Emitted JavaScript, if the checker produced any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default)]
    pub statements: Vec<Node>,
}

const DECLARATION_SUFFIXES: [&str; 3] = [".d.ts", ".d.mts", ".d.cts"];

impl SourceFile {
    pub fn path(&self) -> RepoPath {
        RepoPath::new(&self.file_name)
    }

    pub fn is_declaration(&self) -> bool {
        self.is_declaration_file
            || DECLARATION_SUFFIXES
                .iter()
                .any(|s| self.file_name.ends_with(s))
    }

    /// Source text covered by `[pos, end)`, or an empty string when out of range.
    pub fn slice(&self, pos: u32, end: u32) -> &str {
        self.text.get(pos as usize..end as usize).unwrap_or("")
    }

    pub fn line_map(&self) -> LineMap {
        LineMap::new(&self.text)
    }

    /// Checker diagnostics for this file in the uniform shape.
    pub fn compiler_diagnostics(&self, lines: &LineMap) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .map(|d| {
                let location = d.start.map(|start| {
                    let (line, col) = lines.line_col(&self.text, start);
                    DiagnosticLocation {
                        path: self.path(),
                        start,
                        length: d.length.unwrap_or(0),
                        line,
                        col,
                    }
                });
                Diagnostic {
                    category: d.category,
                    code: d.code,
                    message: d.message.clone(),
                    location,
                    rule: None,
                    fingerprint: None,
                }
            })
            .collect()
    }
}

/// Byte offsets of line starts, for turning offsets into 1-based line/column pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMap {
    starts: Vec<u32>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i as u32 + 1);
            }
        }
        Self { starts }
    }

    pub fn line_col(&self, text: &str, offset: u32) -> (u32, u32) {
        let idx = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.starts[idx];
        let col = match text.get(line_start as usize..offset as usize) {
            Some(prefix) => prefix.chars().count() as u32,
            None => offset.saturating_sub(line_start),
        };
        (idx as u32 + 1, col + 1)
    }
}

/// A loaded program: every root source file plus program-level diagnostics.
#[derive(Clone, Debug, Default)]
pub struct Program {
    files: Vec<SourceFile>,
    global_diagnostics: Vec<Diagnostic>,
}

impl Program {
    pub fn new(files: Vec<SourceFile>, global_diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            files,
            global_diagnostics,
        }
    }

    pub fn source_files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, path: &RepoPath) -> Option<&SourceFile> {
        self.files.iter().find(|f| &f.path() == path)
    }

    pub fn global_diagnostics(&self) -> &[Diagnostic] {
        &self.global_diagnostics
    }

    /// Syntax and type diagnostics: program-level first, then per file in root order.
    pub fn pre_emit_diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = self.global_diagnostics.clone();
        for file in &self.files {
            out.extend(file.compiler_diagnostics(&file.line_map()));
        }
        out
    }

    pub fn has_errors(&self) -> bool {
        self.pre_emit_diagnostics()
            .iter()
            .any(|d| d.category == Category::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_map_is_one_based() {
        let text = "ab\ncd\n\nef";
        let lines = LineMap::new(text);
        assert_eq!(lines.line_col(text, 0), (1, 1));
        assert_eq!(lines.line_col(text, 1), (1, 2));
        assert_eq!(lines.line_col(text, 3), (2, 1));
        assert_eq!(lines.line_col(text, 7), (4, 1));
        assert_eq!(lines.line_col(text, 8), (4, 2));
    }

    #[test]
    fn declaration_detection_uses_flag_or_suffix() {
        let mut f: SourceFile = serde_json::from_str(r#"{"fileName":"src/a.ts"}"#).unwrap();
        assert!(!f.is_declaration());
        f.file_name = "types/index.d.ts".to_string();
        assert!(f.is_declaration());
        f.file_name = "src/a.ts".to_string();
        f.is_declaration_file = true;
        assert!(f.is_declaration());
    }

    #[test]
    fn unknown_node_kinds_deserialize_as_other() {
        let node: Node =
            serde_json::from_str(r#"{"kind":"JsxElement","pos":0,"end":4}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Other);
    }

    #[test]
    fn union_of_literals_is_string_like() {
        let ty: TypeInfo = serde_json::from_str(
            r#"{"name":"'a' | 'b'","kind":"union","members":[
                {"name":"'a'","kind":"stringLiteral"},
                {"name":"'b'","kind":"stringLiteral"}]}"#,
        )
        .unwrap();
        assert!(ty.is_string_like());
        assert_eq!(ty.constituents().count(), 2);

        let mixed: TypeInfo = serde_json::from_str(
            r#"{"name":"string | number","kind":"union","members":[
                {"name":"string","kind":"string"},{"name":"number","kind":"number"}]}"#,
        )
        .unwrap();
        assert!(!mixed.is_string_like());
    }

    #[test]
    fn pre_emit_diagnostics_put_program_level_first() {
        let file: SourceFile = serde_json::from_str(
            r#"{"fileName":"a.ts","text":"let x\n = y;","diagnostics":[
                {"code":2304,"message":"Cannot find name 'y'.","start":9,"length":1}]}"#,
        )
        .unwrap();
        let program = Program::new(
            vec![file],
            vec![Diagnostic::global_error(6053, "File 'b.ts' not found.")],
        );
        let diags = program.pre_emit_diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].code, 6053);
        let loc = diags[1].location.as_ref().unwrap();
        assert_eq!((loc.line, loc.col), (2, 4));
        assert!(program.has_errors());
    }
}
