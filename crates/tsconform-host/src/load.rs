use camino::{Utf8Path, Utf8PathBuf};
use tsconform_domain::{Program, SourceFile};
use tsconform_types::{Diagnostic, RepoPath, ids};

/// Parse one typed-tree document.
pub fn parse_tree(text: &str) -> serde_json::Result<SourceFile> {
    serde_json::from_str(text)
}

/// Load every root file into a [`Program`].
///
/// Unreadable and malformed inputs become program-level diagnostics and are left out
/// of the program; they never abort the load.
pub fn load_program(config_dir: &Utf8Path, roots: &[Utf8PathBuf]) -> Program {
    let mut files = Vec::with_capacity(roots.len());
    let mut diagnostics = Vec::new();

    for root in roots {
        let display = RepoPath::relative_to(config_dir, root);
        let text = match std::fs::read_to_string(root) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(file = %root, error = %err, "root file unreadable");
                diagnostics.push(Diagnostic::global_error(
                    ids::CODE_FILE_NOT_FOUND,
                    format!("File '{display}' not found."),
                ));
                continue;
            }
        };
        match parse_tree(&text) {
            Ok(file) => files.push(file),
            Err(err) => diagnostics.push(Diagnostic::global_error(
                ids::CODE_INVALID_TYPED_TREE,
                format!("Invalid typed tree '{display}': {err}"),
            )),
        }
    }

    tracing::debug!(
        files = files.len(),
        problems = diagnostics.len(),
        "loaded program"
    );
    Program::new(files, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_and_malformed_roots_become_diagnostics() {
        let tmp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        std::fs::write(
            root.join("good.tree.json"),
            r#"{"fileName":"good.ts","text":"x;","statements":[]}"#,
        )
        .expect("write");
        std::fs::write(root.join("bad.tree.json"), "{ nope").expect("write");

        let program = load_program(
            &root,
            &[
                root.join("good.tree.json"),
                root.join("missing.tree.json"),
                root.join("bad.tree.json"),
            ],
        );
        assert_eq!(program.source_files().len(), 1);
        let codes: Vec<u32> = program.global_diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![ids::CODE_FILE_NOT_FOUND, ids::CODE_INVALID_TYPED_TREE]
        );
        assert_eq!(
            program.global_diagnostics()[0].message,
            "File 'missing.tree.json' not found."
        );
        assert!(program.has_errors());
    }
}
