//! Developer tasks (schema generation, fixture conformance, catalog checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tsconform_types::ids;
use walkdir::WalkDir;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(tsconform_types::TsconformReport)
}

fn generate_tsconfig_schema() -> schemars::Schema {
    schema_for!(tsconform_settings::TsConfig)
}

fn generate_exemptions_schema() -> schemars::Schema {
    schema_for!(tsconform_settings::ExemptionFileV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "tsconform.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "tsconform.tsconfig.json",
            generate: generate_tsconfig_schema,
        },
        SchemaSpec {
            filename: "tsconform.exemptions.v1.json",
            generate: generate_exemptions_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }
        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run tsconform on every fixture and validate the JSON reports");
    eprintln!("  rule-coverage     Check the built-in rule catalog for gaps and collisions");
}

fn copy_tree(src: &Path, dest: &Path) -> anyhow::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}

/// Arguments for one fixture: direct mode when it has a root config, build mode over
/// `app/` otherwise.
fn fixture_args(fixture_dir: &Path) -> Option<Vec<&'static str>> {
    if fixture_dir.join("tsconfig.json").exists() {
        Some(Vec::new())
    } else if fixture_dir.join("app").join("tsconfig.json").exists() {
        Some(vec!["-b", "app"])
    } else {
        None
    }
}

/// Run the tsconform binary over every fixture and validate each report.
fn conform() -> anyhow::Result<()> {
    let root = project_root()?;
    let schema_path = schemas_dir()?.join("tsconform.report.v1.json");
    let schema_content = fs::read_to_string(&schema_path).with_context(|| {
        format!(
            "Failed to read {}; run `cargo xtask emit-schemas` first",
            schema_path.display()
        )
    })?;
    let schema_value: serde_json::Value = serde_json::from_str(&schema_content)?;
    let validator = jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))?;

    let bin = root.join("target").join("debug").join("tsconform");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");
    if !bin.exists() {
        bail!(
            "tsconform binary not found at {}.\nRun `cargo build -p tsconform-cli` first.",
            bin.display()
        );
    }

    let fixtures_dir = root.join("tests").join("fixtures");
    let mut errors = Vec::new();
    let mut checked = 0usize;

    let mut fixtures: Vec<PathBuf> = fs::read_dir(&fixtures_dir)
        .context("Failed to read tests/fixtures/")?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    fixtures.sort();

    for fixture_dir in fixtures {
        let name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let Some(args) = fixture_args(&fixture_dir) else {
            continue;
        };

        let scratch = tempfile::tempdir().context("Failed to create temp dir")?;
        copy_tree(&fixture_dir, scratch.path())?;
        let report_out = scratch.path().join("report.json");

        let output = std::process::Command::new(&bin)
            .current_dir(scratch.path())
            .args(&args)
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run tsconform on fixture '{name}'"))?;

        let code = output.status.code();
        if !matches!(code, Some(0 | 1)) {
            errors.push(format!(
                "fixture '{name}': tsconform exited with {code:?}: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }
        let Ok(report_content) = fs::read_to_string(&report_out) else {
            errors.push(format!("fixture '{name}': no report output generated"));
            continue;
        };
        let report: serde_json::Value = serde_json::from_str(&report_content)
            .with_context(|| format!("Failed to parse report for fixture '{name}'"))?;

        for err in validator.iter_errors(&report) {
            errors.push(format!("fixture '{name}': schema validation: {err}"));
        }
        if report["exit_code"].as_i64() != code.map(i64::from) {
            errors.push(format!(
                "fixture '{name}': report exit_code {} does not match process exit {code:?}",
                report["exit_code"]
            ));
        }
        checked += 1;
        println!("  ✓ fixture '{name}' (exit {})", code.unwrap_or(-1));
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Fixture conformance failed with {} errors", errors.len());
    }
    println!("\n✓ {checked} fixtures produce valid reports");
    Ok(())
}

/// Problems with the built-in catalog, one message per problem.
fn catalog_problems() -> Vec<String> {
    let reserved = [
        ids::CODE_EXEMPTION_CONFIG,
        ids::CODE_INVALID_TYPED_TREE,
        ids::CODE_CONFIG_ERROR,
        ids::CODE_FILE_NOT_FOUND,
        ids::CODE_EMIT_FAILED,
    ];
    let mut problems = Vec::new();
    let mut names = BTreeSet::new();
    let mut codes = BTreeSet::new();

    for rule in tsconform_domain::builtin_rules() {
        let valid_name = !rule.name.is_empty()
            && rule
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !rule.name.starts_with('-')
            && !rule.name.ends_with('-');
        if !valid_name {
            problems.push(format!("Rule '{}' is not a kebab-case name", rule.name));
        }
        if !names.insert(rule.name) {
            problems.push(format!("Rule '{}' is listed twice", rule.name));
        }
        if !codes.insert(rule.code) {
            problems.push(format!("Code {} is used by more than one rule", rule.code));
        }
        if reserved.contains(&rule.code) {
            problems.push(format!(
                "Rule '{}' uses reserved diagnostic code {}",
                rule.name, rule.code
            ));
        }
        if rule.description.trim().is_empty() {
            problems.push(format!("Rule '{}' has an empty description", rule.name));
        }
        if tsconform_domain::find_rule(rule.name).map(|d| d.code) != Some(rule.code) {
            problems.push(format!("Rule '{}' is not found by name", rule.name));
        }
    }
    problems
}

fn rule_coverage() -> anyhow::Result<()> {
    let problems = catalog_problems();
    if problems.is_empty() {
        println!(
            "✓ {} built-in rules have unique names, codes, and descriptions",
            tsconform_domain::builtin_rules().len()
        );
        return Ok(());
    }
    for problem in &problems {
        eprintln!("  - {problem}");
    }
    bail!("Rule coverage failed with {} problems", problems.len())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "rule-coverage" => rule_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_no_problems() {
        assert_eq!(catalog_problems(), Vec::<String>::new());
    }

    #[test]
    fn schemas_serialize_with_trailing_newline() {
        for spec in schema_specs() {
            let json = serialize_schema(&(spec.generate)()).expect("serialize");
            assert!(json.ends_with("}\n"), "{}", spec.filename);
        }
    }

    #[test]
    fn fixture_mode_follows_layout() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(fixture_args(dir.path()), None);
        fs::create_dir_all(dir.path().join("app")).expect("mkdir");
        fs::write(dir.path().join("app/tsconfig.json"), "{}").expect("write");
        assert_eq!(fixture_args(dir.path()), Some(vec!["-b", "app"]));
        fs::write(dir.path().join("tsconfig.json"), "{}").expect("write");
        assert_eq!(fixture_args(dir.path()), Some(Vec::new()));
    }
}
