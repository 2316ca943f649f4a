use tsconform_types::{Category, Diagnostic};

/// One diagnostic in the compiler's own layout.
///
/// `path(line,col): error TS<code>: message`, or `error TS<code>: message` without a
/// location. Compiler and conformance diagnostics look the same apart from the message.
pub fn format_diagnostic(d: &Diagnostic) -> String {
    let head = format!("{} TS{}", d.category.as_str(), d.code);
    match &d.location {
        Some(loc) => format!(
            "{}({},{}): {}: {}",
            loc.path.as_str(),
            loc.line,
            loc.col,
            head,
            d.message
        ),
        None => format!("{head}: {}", d.message),
    }
}

/// `Found N error(s).`, printed even when N is zero.
pub fn render_summary(count: usize) -> String {
    match count {
        1 => "Found 1 error.".to_string(),
        n => format!("Found {n} errors."),
    }
}

/// Every diagnostic, one per line, followed by a blank line and the summary.
///
/// The summary counts error-category diagnostics only; warnings are printed but not
/// counted.
pub fn render_text(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        out.push_str(&format_diagnostic(d));
        out.push('\n');
    }
    if !diagnostics.is_empty() {
        out.push('\n');
    }
    let errors = diagnostics
        .iter()
        .filter(|d| d.category == Category::Error)
        .count();
    out.push_str(&render_summary(errors));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsconform_types::{DiagnosticLocation, RepoPath};

    fn located(code: u32, message: &str) -> Diagnostic {
        Diagnostic::global_error(code, message).with_location(DiagnosticLocation {
            path: RepoPath::new("src/app.ts"),
            start: 15,
            length: 3,
            line: 1,
            col: 16,
        })
    }

    #[test]
    fn located_diagnostic_uses_compiler_layout() {
        insta::assert_snapshot!(
            format_diagnostic(&located(21222, "Assigning a plain string is unsafe.")),
            @"src/app.ts(1,16): error TS21222: Assigning a plain string is unsafe."
        );
    }

    #[test]
    fn global_diagnostic_has_no_location_prefix() {
        let mut d = Diagnostic::global_error(6053, "File 'a.tree.json' not found.");
        d.category = Category::Warning;
        insta::assert_snapshot!(
            format_diagnostic(&d),
            @"warning TS6053: File 'a.tree.json' not found."
        );
    }

    #[test]
    fn summary_is_always_printed() {
        assert_eq!(render_text(&[]), "Found 0 errors.\n");
        assert_eq!(render_summary(1), "Found 1 error.");
        let text = render_text(&[located(2304, "a"), located(21225, "b")]);
        assert_eq!(
            text,
            "src/app.ts(1,16): error TS2304: a\n\
             src/app.ts(1,16): error TS21225: b\n\
             \n\
             Found 2 errors.\n"
        );
    }

    #[test]
    fn summary_counts_errors_but_not_warnings() {
        let mut warning = located(6133, "'x' is declared but never used.");
        warning.category = Category::Warning;
        let text = render_text(&[warning, located(21222, "b")]);
        assert_eq!(
            text,
            "src/app.ts(1,16): warning TS6133: 'x' is declared but never used.\n\
             src/app.ts(1,16): error TS21222: b\n\
             \n\
             Found 1 error.\n"
        );

        let mut only_warning = located(6133, "w");
        only_warning.category = Category::Warning;
        assert!(render_text(&[only_warning]).ends_with("\nFound 0 errors.\n"));
    }
}
