use tsconform_domain::builtin_rules;

/// The built-in catalog, one rule per line: name, diagnostic code, description.
pub fn format_rule_list() -> String {
    let rules = builtin_rules();
    let width = rules.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for r in rules {
        out.push_str(&format!(
            "{:<width$}  TS{}  {}\n",
            r.name, r.code, r.description
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsconform_types::ids;

    #[test]
    fn lists_every_builtin_rule() {
        let text = format_rule_list();
        assert_eq!(text.lines().count(), builtin_rules().len());
        assert!(text.contains(ids::RULE_TRUSTED_HTML_SINK));
        assert!(text.contains("TS21222"));
    }
}
