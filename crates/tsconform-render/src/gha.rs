use tsconform_types::{Category, Diagnostic};

/// Render diagnostics as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line},col={col}::[{rule or TS code}] {message}`
pub fn render_github_annotations(diagnostics: &[Diagnostic]) -> Vec<String> {
    let mut out = Vec::new();

    for d in diagnostics {
        let level = match d.category {
            Category::Error => "error",
            Category::Warning => "warning",
            Category::Suggestion | Category::Message => "notice",
        };

        let mut meta = String::new();
        if let Some(loc) = &d.location {
            meta.push_str(&format!(
                "file={},line={},col={}",
                escape_property(loc.path.as_str()),
                loc.line,
                loc.col
            ));
        }

        let tag = match &d.rule {
            Some(rule) => rule.clone(),
            None => format!("TS{}", d.code),
        };
        let message = escape_data(&format!("[{tag}] {}", d.message));

        if meta.is_empty() {
            out.push(format!("::{level}::{message}"));
        } else {
            out.push(format!("::{level} {meta}::{message}"));
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsconform_types::{DiagnosticLocation, RepoPath};

    #[test]
    fn conformance_diagnostic_carries_rule_and_location() {
        let mut d = Diagnostic::global_error(21225, "x === NaN is always false.\nSuggested fix:")
            .with_location(DiagnosticLocation {
                path: RepoPath::new("src/a.ts"),
                start: 4,
                length: 9,
                line: 1,
                col: 5,
            });
        d.rule = Some("equals-nan".to_string());

        let lines = render_github_annotations(&[d]);
        assert_eq!(
            lines,
            vec![
                "::error file=src/a.ts,line=1,col=5::[equals-nan] x === NaN is always false.%0ASuggested fix:"
                    .to_string()
            ]
        );
    }

    #[test]
    fn compiler_diagnostic_without_location_uses_code_tag() {
        let d = Diagnostic::global_error(5083, "Cannot read file 'tsconfig.json'.");
        let lines = render_github_annotations(&[d]);
        insta::assert_snapshot!(
            &lines[0],
            @"::error::[TS5083] Cannot read file 'tsconfig.json'."
        );
    }
}
