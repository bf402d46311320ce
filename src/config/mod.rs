use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level configuration from `.sarifbridge.toml`.
///
/// Every field is optional; CLI flags override config values, which in
/// turn override the built-in per-family defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub codespell: AnalyzerConfig,
    #[serde(default)]
    pub cppcheck: AnalyzerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Per-family command overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Program name or path to run instead of the family default.
    pub command: Option<String>,
    /// Space-separated argument string instead of the family default.
    pub args: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// uriBaseId token for artifact locations.
    pub base_uri: Option<String>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# sarif-bridge configuration
# CLI flags override these values; unset keys fall back to built-in defaults.

[codespell]
# command = "codespell"
# args = "-q 3"

[cppcheck]
# command = "cppcheck"
# args = "--xml -q"

[output]
# uriBaseId token used to namespace artifact locations.
# base_uri = "SRCROOT"
"#
    }
}
