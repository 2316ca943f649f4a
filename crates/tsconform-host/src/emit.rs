use camino::{Utf8Path, Utf8PathBuf};
use tsconform_domain::{Program, SourceFile};
use tsconform_settings::ResolvedConfig;
use tsconform_types::{Diagnostic, RepoPath, ids};

/// What one emit call wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitResult {
    pub emitted: Vec<Utf8PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    /// True when emit was turned off for this call.
    pub skipped: bool,
}

impl EmitResult {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// Where `file`'s JavaScript lands, or `None` for declaration files.
pub fn output_path(cfg: &ResolvedConfig, file: &SourceFile) -> Option<Utf8PathBuf> {
    if file.is_declaration() {
        return None;
    }
    let name = file.path();
    let rel = match &cfg.root_dir {
        Some(root) if name.starts_with_segment(root.as_str()) => name
            .as_str()
            .strip_prefix(root.as_str().trim_end_matches('/'))
            .map(|s| s.trim_start_matches('/'))
            .unwrap_or(name.as_str())
            .to_string(),
        _ => name.as_str().to_string(),
    };
    Some(cfg.out_dir.join(js_file_name(&rel)))
}

fn js_file_name(rel: &str) -> String {
    const MAP: [(&str, &str); 4] = [(".tsx", ".js"), (".mts", ".mjs"), (".cts", ".cjs"), (".ts", ".js")];
    for (from, to) in MAP {
        if let Some(stem) = rel.strip_suffix(from) {
            return format!("{stem}{to}");
        }
    }
    rel.to_string()
}

/// Write every file's emitted JavaScript. `disable` suppresses all writes for this call.
pub fn emit(cfg: &ResolvedConfig, program: &Program, disable: bool) -> EmitResult {
    if cfg.no_emit || disable {
        tracing::info!(no_emit = cfg.no_emit, "emit skipped");
        return EmitResult::skipped();
    }

    let mut result = EmitResult::default();
    for file in program.source_files() {
        let (Some(out), Some(js)) = (output_path(cfg, file), file.output.as_deref()) else {
            continue;
        };
        match write_output(&out, js) {
            Ok(()) => result.emitted.push(out),
            Err(err) => {
                let shown = RepoPath::relative_to(&cfg.config_dir, &out);
                result.diagnostics.push(Diagnostic::global_error(
                    ids::CODE_EMIT_FAILED,
                    format!("Could not write file '{shown}': {err}."),
                ));
            }
        }
    }
    tracing::info!(files = result.emitted.len(), "emitted");
    result
}

fn write_output(path: &Utf8Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tsconform_settings::{parse_tsconfig, resolve_config};

    fn config(root: &Utf8Path, json: &str) -> ResolvedConfig {
        resolve_config(
            parse_tsconfig(json).expect("parse"),
            &root.join("tsconfig.json"),
        )
        .expect("resolve")
    }

    fn file(name: &str, output: Option<&str>) -> SourceFile {
        SourceFile {
            file_name: name.to_string(),
            is_declaration_file: false,
            text: String::new(),
            diagnostics: Vec::new(),
            output: output.map(str::to_string),
            statements: Vec::new(),
        }
    }

    #[test]
    fn output_layout_follows_out_dir_root_dir_and_extension() {
        let root = Utf8Path::new("/p");
        let cfg = config(root, r#"{"compilerOptions":{"outDir":"dist","rootDir":"src"}}"#);
        assert_eq!(
            output_path(&cfg, &file("src/app.ts", None)),
            Some(Utf8PathBuf::from("/p/dist/app.js"))
        );
        assert_eq!(
            output_path(&cfg, &file("src/ui/view.tsx", None)),
            Some(Utf8PathBuf::from("/p/dist/ui/view.js"))
        );
        assert_eq!(
            output_path(&cfg, &file("lib/x.mts", None)),
            Some(Utf8PathBuf::from("/p/dist/lib/x.mjs"))
        );
        assert_eq!(output_path(&cfg, &file("src/types.d.ts", None)), None);
    }

    #[test]
    fn emit_writes_outputs_unless_disabled() {
        let tmp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        let cfg = config(&root, r#"{"compilerOptions":{"outDir":"out"}}"#);
        let program = Program::new(
            vec![file("a.ts", Some("a();\n")), file("b.ts", None)],
            Vec::new(),
        );

        let skipped = emit(&cfg, &program, true);
        assert!(skipped.skipped);
        assert!(!root.join("out/a.js").exists());

        let written = emit(&cfg, &program, false);
        assert_eq!(written.emitted, vec![root.join("out/a.js")]);
        assert!(written.diagnostics.is_empty());
        assert_eq!(
            std::fs::read_to_string(root.join("out/a.js")).expect("read"),
            "a();\n"
        );
    }

    #[test]
    fn no_emit_in_config_wins() {
        let tmp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        let cfg = config(&root, r#"{"compilerOptions":{"noEmit":true}}"#);
        let program = Program::new(vec![file("a.ts", Some("a();"))], Vec::new());
        assert!(emit(&cfg, &program, false).skipped);
        assert!(!root.join("a.js").exists());
    }
}
