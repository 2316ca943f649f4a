use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name that marks our entry in `compilerOptions.plugins`.
pub const PLUGIN_NAME: &str = "tsconform";

/// The subset of `tsconfig.json` tsconform understands.
///
/// Unknown keys are ignored so ordinary compiler configs load unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub compiler_options: CompilerOptionsConfig,

    /// Explicit root files. Takes precedence over `include`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ProjectReference>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptionsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_emit: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_emit_on_error: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_build_info_file: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginConfig>,
}

/// One `compilerOptions.plugins` entry. Entries for other plugins are kept but ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    pub name: String,

    /// Exemption file, relative to the directory holding the config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exemption_config: Option<String>,

    /// Catalog rules to leave out of this project.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_rules: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectReference {
    /// Directory holding a `tsconfig.json`, or a config file.
    pub path: String,
}

impl CompilerOptionsConfig {
    pub fn tsconform_plugin(&self) -> Option<&PluginConfig> {
        self.plugins.iter().find(|p| p.name == PLUGIN_NAME)
    }
}
