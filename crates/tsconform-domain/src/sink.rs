//! Declarative descriptors for trusted-value types.
//!
//! A type is recognized by where it is declared and by its fully qualified name. Both
//! must match: unrelated code is free to declare its own `TrustedHTML`.

use crate::model::{TypeDeclaration, TypeInfo};
use std::sync::LazyLock;

const TRUSTED_TYPES_MODULE_SUFFIX: &str = "/@types/trusted-types/index.d.ts";
const DECLARATION_EXTENSIONS: [&str; 3] = [".d.ts", ".d.mts", ".d.cts"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SinkConfigError {
    #[error("module path suffix '{0}' does not name a declaration file")]
    NotADeclarationFile(String),
    #[error("fully qualified name must not be empty")]
    EmptyName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    module_path_suffix: String,
    fully_qualified_name: String,
}

impl SinkConfig {
    pub fn new(
        module_path_suffix: impl Into<String>,
        fully_qualified_name: impl Into<String>,
    ) -> Result<Self, SinkConfigError> {
        let module_path_suffix = module_path_suffix.into();
        let fully_qualified_name = fully_qualified_name.into();
        if !DECLARATION_EXTENSIONS
            .iter()
            .any(|ext| module_path_suffix.ends_with(ext))
        {
            return Err(SinkConfigError::NotADeclarationFile(module_path_suffix));
        }
        if fully_qualified_name.trim().is_empty() {
            return Err(SinkConfigError::EmptyName);
        }
        Ok(Self {
            module_path_suffix,
            fully_qualified_name,
        })
    }

    pub fn module_path_suffix(&self) -> &str {
        &self.module_path_suffix
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    pub fn matches_declaration(&self, decl: &TypeDeclaration) -> bool {
        decl.qualified_name == self.fully_qualified_name
            && decl
                .file
                .replace('\\', "/")
                .ends_with(&self.module_path_suffix)
    }

    /// True when `ty` itself is the configured type.
    pub fn matches_type(&self, ty: &TypeInfo) -> bool {
        ty.declarations.iter().any(|d| self.matches_declaration(d))
    }

    /// True when `ty` or any of its union members is the configured type.
    pub fn appears_in(&self, ty: &TypeInfo) -> bool {
        ty.constituents().any(|t| self.matches_type(t))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrustedTypeKind {
    Html,
    Script,
    ScriptUrl,
}

impl TrustedTypeKind {
    pub const ALL: [TrustedTypeKind; 3] = [
        TrustedTypeKind::Html,
        TrustedTypeKind::Script,
        TrustedTypeKind::ScriptUrl,
    ];

    pub fn type_name(self) -> &'static str {
        match self {
            TrustedTypeKind::Html => "TrustedHTML",
            TrustedTypeKind::Script => "TrustedScript",
            TrustedTypeKind::ScriptUrl => "TrustedScriptURL",
        }
    }

    /// The process-wide descriptor for this kind.
    pub fn sink(self) -> &'static SinkConfig {
        match self {
            TrustedTypeKind::Html => &*TRUSTED_HTML,
            TrustedTypeKind::Script => &*TRUSTED_SCRIPT,
            TrustedTypeKind::ScriptUrl => &*TRUSTED_SCRIPT_URL,
        }
    }

    fn build(self) -> SinkConfig {
        SinkConfig {
            module_path_suffix: TRUSTED_TYPES_MODULE_SUFFIX.to_string(),
            fully_qualified_name: format!("global.{}", self.type_name()),
        }
    }
}

static TRUSTED_HTML: LazyLock<SinkConfig> = LazyLock::new(|| TrustedTypeKind::Html.build());
static TRUSTED_SCRIPT: LazyLock<SinkConfig> = LazyLock::new(|| TrustedTypeKind::Script.build());
static TRUSTED_SCRIPT_URL: LazyLock<SinkConfig> =
    LazyLock::new(|| TrustedTypeKind::ScriptUrl.build());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKind;

    fn declared(file: &str, name: &str) -> TypeInfo {
        TypeInfo {
            name: name.rsplit('.').next().unwrap_or(name).to_string(),
            kind: TypeKind::Object,
            declarations: vec![TypeDeclaration {
                file: file.to_string(),
                qualified_name: name.to_string(),
            }],
            members: Vec::new(),
        }
    }

    #[test]
    fn html_matches_types_package_declaration() {
        let sink = TrustedTypeKind::Html.sink();
        let ty = declared(
            "/work/app/node_modules/@types/trusted-types/index.d.ts",
            "global.TrustedHTML",
        );
        assert!(sink.matches_type(&ty));
    }

    #[test]
    fn same_name_declared_elsewhere_does_not_match() {
        let sink = TrustedTypeKind::Html.sink();
        let ty = declared("/work/app/src/my-types.d.ts", "global.TrustedHTML");
        assert!(!sink.matches_type(&ty));
    }

    #[test]
    fn right_file_wrong_name_does_not_match() {
        let sink = TrustedTypeKind::Html.sink();
        let ty = declared(
            "/work/app/node_modules/@types/trusted-types/index.d.ts",
            "global.TrustedScript",
        );
        assert!(!sink.matches_type(&ty));
        assert!(TrustedTypeKind::Script.sink().matches_type(&ty));
    }

    #[test]
    fn windows_separators_are_normalized() {
        let sink = TrustedTypeKind::ScriptUrl.sink();
        let ty = declared(
            "C:\\app\\node_modules\\@types\\trusted-types\\index.d.ts",
            "global.TrustedScriptURL",
        );
        assert!(sink.matches_type(&ty));
    }

    #[test]
    fn appears_in_looks_through_unions() {
        let sink = TrustedTypeKind::Html.sink();
        let union = TypeInfo {
            name: "TrustedHTML | null".to_string(),
            kind: TypeKind::Union,
            declarations: Vec::new(),
            members: vec![
                declared(
                    "/x/node_modules/@types/trusted-types/index.d.ts",
                    "global.TrustedHTML",
                ),
                TypeInfo {
                    name: "null".to_string(),
                    ..TypeInfo::default()
                },
            ],
        };
        assert!(sink.appears_in(&union));
        assert!(!sink.matches_type(&union));
    }

    #[test]
    fn constructor_validates_descriptor() {
        assert_eq!(
            SinkConfig::new("/lib/foo.ts", "global.Foo"),
            Err(SinkConfigError::NotADeclarationFile("/lib/foo.ts".to_string()))
        );
        assert_eq!(
            SinkConfig::new("/lib/foo.d.ts", " "),
            Err(SinkConfigError::EmptyName)
        );
        let custom = SinkConfig::new("/lib/safe.d.mts", "SafeUrl").unwrap();
        assert_eq!(custom.module_path_suffix(), "/lib/safe.d.mts");
    }

    #[test]
    fn canonical_descriptors_share_the_template() {
        for kind in TrustedTypeKind::ALL {
            let sink = kind.sink();
            assert_eq!(sink.module_path_suffix(), TRUSTED_TYPES_MODULE_SUFFIX);
            assert_eq!(
                sink.fully_qualified_name(),
                format!("global.{}", kind.type_name())
            );
        }
    }
}
