use crate::model::TsConfig;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use tsconform_domain::{RuleDescriptor, builtin_rules, find_rule};
use tsconform_types::RepoPath;

pub const DEFAULT_INCLUDE: &str = "**/*.tree.json";
const DEFAULT_BUILD_INFO: &str = "tsconfig.tsbuildinfo";

/// Everything the host and orchestrator need from one project config.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    /// `None` when the project was given as bare root files.
    pub config_path: Option<Utf8PathBuf>,
    pub config_dir: Utf8PathBuf,

    /// Explicit root files. When set, `include`/`exclude` are not consulted.
    pub files: Option<Vec<Utf8PathBuf>>,
    pub include: GlobSet,
    pub exclude: GlobSet,

    pub no_emit: bool,
    pub no_emit_on_error: bool,
    pub out_dir: Utf8PathBuf,
    /// Project-relative directory stripped from file names when laying out outputs.
    pub root_dir: Option<RepoPath>,
    pub build_info_path: Utf8PathBuf,

    pub exemption_config: Option<Utf8PathBuf>,
    pub rules: Vec<RuleDescriptor>,

    /// Referenced projects, resolved against `config_dir` (directory or config file).
    pub references: Vec<Utf8PathBuf>,
}

impl ResolvedConfig {
    /// Defaults used when root files are named directly and no config is loaded.
    pub fn for_root_files(cwd: &Utf8Path, files: &[Utf8PathBuf]) -> Self {
        Self {
            config_path: None,
            config_dir: cwd.to_path_buf(),
            files: Some(files.iter().map(|f| cwd.join(f)).collect()),
            include: GlobSet::empty(),
            exclude: GlobSet::empty(),
            no_emit: false,
            no_emit_on_error: false,
            out_dir: cwd.to_path_buf(),
            root_dir: None,
            build_info_path: cwd.join(DEFAULT_BUILD_INFO),
            exemption_config: None,
            rules: builtin_rules(),
            references: Vec::new(),
        }
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }
}

pub fn resolve_config(cfg: TsConfig, config_path: &Utf8Path) -> anyhow::Result<ResolvedConfig> {
    let config_dir = config_path
        .parent()
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|| Utf8PathBuf::from("."));
    let opts = &cfg.compiler_options;

    let out_dir = match opts.out_dir.as_deref() {
        Some(dir) => config_dir.join(dir),
        None => config_dir.clone(),
    };
    let build_info_path = match opts.ts_build_info_file.as_deref() {
        Some(file) => config_dir.join(file),
        None => out_dir.join(DEFAULT_BUILD_INFO),
    };

    let files = cfg
        .files
        .as_ref()
        .map(|files| files.iter().map(|f| config_dir.join(f)).collect());

    let include_patterns = cfg
        .include
        .clone()
        .unwrap_or_else(|| vec![DEFAULT_INCLUDE.to_string()]);
    let include = build_globset("include", &include_patterns)?;

    let exclude_patterns = match &cfg.exclude {
        Some(patterns) => patterns.clone(),
        None => default_excludes(opts.out_dir.as_deref()),
    };
    let exclude = build_globset("exclude", &exclude_patterns)?;

    let plugin = opts.tsconform_plugin();
    let exemption_config = plugin
        .and_then(|p| p.exemption_config.as_deref())
        .map(|p| config_dir.join(p));
    let disabled = plugin.map(|p| p.disabled_rules.as_slice()).unwrap_or(&[]);
    let rules = enabled_rules(disabled)?;

    let references = cfg
        .references
        .iter()
        .map(|r| config_dir.join(&r.path))
        .collect();

    Ok(ResolvedConfig {
        config_path: Some(config_path.to_path_buf()),
        config_dir,
        files,
        include,
        exclude,
        no_emit: opts.no_emit.unwrap_or(false),
        no_emit_on_error: opts.no_emit_on_error.unwrap_or(false),
        out_dir,
        root_dir: opts.root_dir.as_deref().map(RepoPath::new),
        build_info_path,
        exemption_config,
        rules,
        references,
    })
}

fn default_excludes(out_dir: Option<&str>) -> Vec<String> {
    let mut v = vec!["node_modules/**".to_string()];
    if let Some(dir) = out_dir {
        let dir = RepoPath::new(dir);
        v.push(format!("{}/**", dir.as_str().trim_end_matches('/')));
    }
    v
}

fn build_globset(field: &str, patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = RepoPath::new(pattern);
        let glob: Glob = GlobBuilder::new(pattern.as_str())
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid {field} glob: {pattern}"))?;
        builder.add(glob);
    }
    builder
        .build()
        .with_context(|| format!("failed to compile {field} globs"))
}

/// The catalog minus `disabled`, in catalog order.
fn enabled_rules(disabled: &[String]) -> anyhow::Result<Vec<RuleDescriptor>> {
    let mut skip = BTreeSet::new();
    for name in disabled {
        if find_rule(name).is_none() {
            anyhow::bail!("unknown rule in disabledRules: {name}");
        }
        skip.insert(name.as_str());
    }
    Ok(builtin_rules()
        .into_iter()
        .filter(|r| !skip.contains(r.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_tsconfig;
    use tsconform_types::ids;

    fn resolve(json: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_tsconfig(json)?, Utf8Path::new("/proj/tsconfig.json"))
    }

    #[test]
    fn defaults_enable_every_rule_and_include_tree_files() {
        let cfg = resolve("{}").unwrap();
        assert_eq!(cfg.config_dir, Utf8PathBuf::from("/proj"));
        assert_eq!(cfg.rules.len(), builtin_rules().len());
        assert!(cfg.include.is_match("src/app.tree.json"));
        assert!(!cfg.include.is_match("src/app.ts"));
        assert!(cfg.exclude.is_match("node_modules/x/a.tree.json"));
        assert!(!cfg.no_emit && !cfg.no_emit_on_error);
        assert_eq!(cfg.out_dir, Utf8PathBuf::from("/proj"));
        assert_eq!(
            cfg.build_info_path,
            Utf8PathBuf::from("/proj/tsconfig.tsbuildinfo")
        );
        assert_eq!(cfg.exemption_config, None);
    }

    #[test]
    fn plugin_entry_sets_exemptions_and_disables_rules() {
        let cfg = resolve(
            r#"{
              "compilerOptions": {
                "outDir": "dist",
                "noEmitOnError": true,
                "plugins": [
                  { "name": "some-other-plugin" },
                  { "name": "tsconform",
                    "exemptionConfig": "conformance/exemptions.json",
                    "disabledRules": ["equals-nan"] }
                ]
              }
            }"#,
        )
        .unwrap();
        assert!(cfg.no_emit_on_error);
        assert_eq!(cfg.out_dir, Utf8PathBuf::from("/proj/dist"));
        assert!(cfg.exclude.is_match("dist/app.tree.json"));
        assert_eq!(
            cfg.exemption_config,
            Some(Utf8PathBuf::from("/proj/conformance/exemptions.json"))
        );
        assert!(cfg.rule_names().all(|n| n != ids::RULE_EQUALS_NAN));
        assert_eq!(cfg.rules.len(), builtin_rules().len() - 1);
    }

    #[test]
    fn unknown_disabled_rule_is_a_config_error() {
        let err = resolve(
            r#"{"compilerOptions":{"plugins":[{"name":"tsconform","disabledRules":["nope"]}]}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn bad_include_glob_is_a_config_error() {
        let err = resolve(r#"{"include":["src/[a"]}"#).unwrap_err();
        assert!(err.to_string().contains("include"));
    }

    #[test]
    fn explicit_files_and_references_resolve_against_config_dir() {
        let cfg = resolve(
            r#"{"files":["a.tree.json"],"references":[{"path":"../core"}],
                "compilerOptions":{"tsBuildInfoFile":"cache/info"}}"#,
        )
        .unwrap();
        assert_eq!(
            cfg.files,
            Some(vec![Utf8PathBuf::from("/proj/a.tree.json")])
        );
        assert_eq!(cfg.references, vec![Utf8PathBuf::from("/proj/../core")]);
        assert_eq!(cfg.build_info_path, Utf8PathBuf::from("/proj/cache/info"));
    }

    #[test]
    fn comments_are_rejected() {
        assert!(parse_tsconfig("// hi\n{}").is_err());
    }
}
