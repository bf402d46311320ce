pub mod codespell;
pub mod cppcheck;

use std::path::{Path, PathBuf};

use crate::catalog::identifier_to_name;
use crate::error::Result;
use crate::invoke::OutputChannel;

/// One normalized diagnostic occurrence.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Rule identifier (e.g. "CS0001", "CWE457").
    pub rule_id: String,
    /// Material for the lazily built catalog entry.
    pub rule: RuleSeed,
    /// Human-readable description of this occurrence.
    pub message: String,
    /// Path relative to the scan root, optionally prefixed. Never absolute.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
    /// Free-text severity tier; absent for the line-oriented family.
    pub severity: Option<String>,
}

/// What the catalog needs to build a `RuleDefinition` on first occurrence.
#[derive(Debug, Clone)]
pub struct RuleSeed {
    pub name: RuleName,
    pub description: Option<String>,
    pub help_uri: Option<String>,
    pub severity: Option<String>,
}

/// Rule display name, either fixed by the family or derived from the
/// tool's camelCase short identifier. Derivation is deferred until the
/// catalog actually interns the rule.
#[derive(Debug, Clone)]
pub enum RuleName {
    Literal(&'static str),
    FromIdentifier(String),
}

impl RuleName {
    pub fn resolve(&self) -> String {
        match self {
            Self::Literal(name) => (*name).to_string(),
            Self::FromIdentifier(identifier) => identifier_to_name(identifier),
        }
    }
}

/// Shared parse inputs: the scan root (made absolute once) and the
/// caller-supplied path prefix.
#[derive(Debug, Clone)]
pub struct ParseContext {
    scan_root: PathBuf,
    prefix: String,
}

impl ParseContext {
    pub fn new(scan_root: &Path, prefix: &str) -> Result<Self> {
        Ok(Self {
            scan_root: std::path::absolute(scan_root)?,
            prefix: prefix.to_string(),
        })
    }

    /// Express an analyzer-reported path relative to the scan root, with
    /// the prefix prepended. Paths outside the root relativize through
    /// `..` components rather than staying absolute.
    pub fn relativize(&self, reported: &str) -> String {
        let reported_abs = std::path::absolute(Path::new(reported))
            .unwrap_or_else(|_| PathBuf::from(reported));
        let relative = pathdiff::diff_paths(&reported_abs, &self.scan_root)
            .unwrap_or(reported_abs);
        format!("{}{}", self.prefix, relative.display())
    }
}

/// Parsed analyzer output: findings in emission order, plus the tool
/// version when the output stream embeds it.
#[derive(Debug, Default)]
pub struct ParsedOutput {
    pub findings: Vec<Finding>,
    pub tool_version: Option<String>,
}

/// An analyzer family: invocation defaults plus a pure parser from the
/// captured byte stream to normalized findings. The assembler and catalog
/// are written once against this trait and never branch on family.
pub trait Analyzer: Send + Sync {
    fn family(&self) -> Family;
    /// Driver name for the SARIF tool block.
    fn tool_name(&self) -> &'static str;
    fn information_uri(&self) -> &'static str;
    fn default_command(&self) -> &'static str;
    fn default_args(&self) -> &'static str;
    /// Which stream the tool emits findings on.
    fn channel(&self) -> OutputChannel;
    /// Whether the output stream carries the tool version; families that
    /// don't are probed with `--version` instead.
    fn embeds_version(&self) -> bool;
    fn parse(&self, raw: &[u8], ctx: &ParseContext) -> Result<ParsedOutput>;
}

/// Registered analyzer families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Codespell,
    Cppcheck,
}

impl Family {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "codespell" => Some(Self::Codespell),
            "cppcheck" => Some(Self::Cppcheck),
            _ => None,
        }
    }

    pub fn all() -> &'static [Family] {
        &[Self::Codespell, Self::Cppcheck]
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codespell => write!(f, "codespell"),
            Self::Cppcheck => write!(f, "cppcheck"),
        }
    }
}

/// Get the analyzer implementation for a family.
pub fn analyzer_for(family: Family) -> Box<dyn Analyzer> {
    match family {
        Family::Codespell => Box::new(codespell::CodespellAnalyzer),
        Family::Cppcheck => Box::new(cppcheck::CppcheckAnalyzer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relativize_strips_scan_root() {
        let ctx = ParseContext::new(Path::new("/home/x/proj"), "").unwrap();
        assert_eq!(ctx.relativize("/home/x/proj/src/a.c"), "src/a.c");
    }

    #[test]
    fn relativize_prepends_prefix() {
        let ctx = ParseContext::new(Path::new("/home/x/proj"), "repo/").unwrap();
        assert_eq!(ctx.relativize("/home/x/proj/src/a.c"), "repo/src/a.c");
    }

    #[test]
    fn relativize_path_outside_root_uses_parent_components() {
        let ctx = ParseContext::new(Path::new("/home/x/proj"), "").unwrap();
        assert_eq!(ctx.relativize("/home/x/other/b.c"), "../other/b.c");
    }

    #[test]
    fn family_lenient_parsing() {
        assert_eq!(Family::from_str_lenient("CppCheck"), Some(Family::Cppcheck));
        assert_eq!(Family::from_str_lenient("codespell"), Some(Family::Codespell));
        assert_eq!(Family::from_str_lenient("clippy"), None);
    }

    #[test]
    fn rule_name_resolution() {
        assert_eq!(RuleName::Literal("SpellingMistake").resolve(), "SpellingMistake");
        assert_eq!(
            RuleName::FromIdentifier("uninitVariable".to_string()).resolve(),
            "Uninit Variable"
        );
    }
}
