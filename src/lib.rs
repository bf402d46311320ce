//! sarif-bridge — normalize static-analyzer output into SARIF 2.1.0.
//!
//! Runs an external analyzer (codespell-style line output or
//! cppcheck-style XML), parses its captured stream into normalized
//! findings, interns rule definitions into a deduplicated catalog, and
//! assembles a SARIF document carrying tool identity and version-control
//! provenance.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use sarifbridge::{convert, render_report, ConvertOptions, Family};
//!
//! let options = ConvertOptions::default();
//! let report = convert(Path::new("."), Family::Cppcheck, &options).unwrap();
//! println!("{}", render_report(&report).unwrap());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod invoke;
pub mod output;
pub mod parser;
pub mod report;
pub mod vcs;

use std::path::Path;

use config::Config;
use error::Result;
use report::{Report, ToolIdentity};

pub use parser::Family;

/// Options for one conversion run. Unset fields fall back to the config
/// file, then to the analyzer family's built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Analyzer program name or path.
    pub command: Option<String>,
    /// Space-separated analyzer argument string.
    pub args: Option<String>,
    /// uriBaseId token for artifact locations.
    pub base_uri: Option<String>,
    /// Prefix prepended to every emitted file path.
    pub prefix: String,
    /// Config file path (defaults to `.sarifbridge.toml` in the scan path).
    pub config_path: Option<std::path::PathBuf>,
}

const DEFAULT_BASE_URI: &str = "SRCROOT";

/// Run the full conversion pipeline: provenance, analyzer invocation,
/// parse, catalog interning, assembly.
pub fn convert(path: &Path, family: Family, options: &ConvertOptions) -> Result<Report> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| path.join(".sarifbridge.toml"));
    let config = Config::load(&config_path)?;

    let analyzer = parser::analyzer_for(family);
    let family_config = match family {
        Family::Codespell => &config.codespell,
        Family::Cppcheck => &config.cppcheck,
    };

    let command = options
        .command
        .clone()
        .or_else(|| family_config.command.clone())
        .unwrap_or_else(|| analyzer.default_command().to_string());
    let args_str = options
        .args
        .clone()
        .or_else(|| family_config.args.clone())
        .unwrap_or_else(|| analyzer.default_args().to_string());
    let base_uri = options
        .base_uri
        .clone()
        .or_else(|| config.output.base_uri.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URI.to_string());

    let provenance = vcs::read(path);

    let args = invoke::split_args(&args_str);
    tracing::debug!(%family, %command, ?args, "running analyzer");
    let raw = invoke::run_analyzer(&command, &args, path, analyzer.channel());

    let ctx = parser::ParseContext::new(path, &options.prefix)?;
    let parsed = analyzer.parse(&raw, &ctx)?;
    tracing::debug!(findings = parsed.findings.len(), "parsed analyzer output");

    // Line-oriented tools don't embed their version in the finding
    // stream; ask the tool directly.
    let version = match parsed.tool_version {
        Some(v) => v,
        None if !analyzer.embeds_version() => invoke::probe_version(&command),
        None => String::new(),
    };

    let tool = ToolIdentity {
        name: analyzer.tool_name().to_string(),
        version,
        information_uri: analyzer.information_uri().to_string(),
    };

    Ok(report::assemble(
        provenance,
        tool,
        base_uri,
        std::path::absolute(path)?,
        parsed.findings,
    ))
}

/// Serialize an assembled report as a SARIF 2.1.0 document.
pub fn render_report(report: &Report) -> Result<String> {
    output::sarif::render(report)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    /// Stand-in analyzer: `cat <fixture> <target>` emits the fixture on
    /// stdout (the target directory itself fails to cat, which also
    /// exercises the non-zero-exit path).
    fn cat_options(fixture: &Path) -> ConvertOptions {
        ConvertOptions {
            command: Some("cat".to_string()),
            args: Some(fixture.display().to_string()),
            ..ConvertOptions::default()
        }
    }

    #[test]
    fn codespell_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("codespell.out");
        std::fs::write(
            &fixture,
            "/p/a.c:10:  teh -> the\n/p/b.c:20: hte -> the\n\n",
        )
        .unwrap();

        let report = convert(Path::new("/p"), Family::Codespell, &cat_options(&fixture)).unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.catalog.len(), 1);
        assert_eq!(report.catalog.rules()[0].id, "CS0001");
        assert_eq!(report.results[0].finding.file, "a.c");
        assert_eq!(report.results[1].finding.file, "b.c");
        assert_eq!(report.results[0].rule_index, 0);
        assert_eq!(report.results[1].rule_index, 0);
        assert_eq!(report.scan_root, PathBuf::from("/p"));

        let rendered = render_report(&report).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(doc["runs"][0]["results"][0]["ruleId"], "CS0001");
        assert_eq!(doc["runs"][0]["originalUriBaseIds"]["SRCROOT"]["uri"], "FILE:///p/");
    }

    #[test]
    fn empty_analyzer_output_yields_empty_report() {
        // `true` produces no output on either stream.
        let options = ConvertOptions {
            command: Some("true".to_string()),
            args: Some(String::new()),
            ..ConvertOptions::default()
        };
        let report = convert(Path::new("/p"), Family::Codespell, &options).unwrap();
        assert!(report.results.is_empty());
        assert!(report.catalog.is_empty());

        let report = convert(Path::new("/p"), Family::Cppcheck, &options).unwrap();
        assert!(report.results.is_empty());
        assert!(report.catalog.is_empty());
    }

    #[test]
    fn missing_analyzer_behaves_like_zero_findings() {
        let options = ConvertOptions {
            command: Some("definitely-not-a-real-analyzer-9921".to_string()),
            args: Some(String::new()),
            ..ConvertOptions::default()
        };
        let report = convert(Path::new("/p"), Family::Codespell, &options).unwrap();
        assert!(report.results.is_empty());
    }

    #[test]
    fn base_uri_override_flows_into_report() {
        let options = ConvertOptions {
            command: Some("true".to_string()),
            args: Some(String::new()),
            base_uri: Some("REPO".to_string()),
            ..ConvertOptions::default()
        };
        let report = convert(Path::new("/p"), Family::Codespell, &options).unwrap();
        assert_eq!(report.base_uri, "REPO");
    }

    #[test]
    fn config_file_supplies_defaults_cli_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".sarifbridge.toml"),
            "[codespell]\ncommand = \"true\"\n\n[output]\nbase_uri = \"CFG\"\n",
        )
        .unwrap();

        // Config supplies both command and base_uri.
        let report = convert(dir.path(), Family::Codespell, &ConvertOptions::default()).unwrap();
        assert_eq!(report.base_uri, "CFG");
        assert!(report.results.is_empty());

        // Explicit option wins over config.
        let options = ConvertOptions {
            base_uri: Some("CLI".to_string()),
            ..ConvertOptions::default()
        };
        let report = convert(dir.path(), Family::Codespell, &options).unwrap();
        assert_eq!(report.base_uri, "CLI");
    }
}
