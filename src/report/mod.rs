//! Report assembly.
//!
//! Folds parsed findings through the rule catalog in parse order: each
//! finding interns its rule (building the definition lazily on first
//! occurrence) and records its catalog index. Findings themselves are
//! never reordered or deduplicated.

use std::path::PathBuf;

use crate::catalog::{RuleCatalog, RuleDefinition};
use crate::parser::Finding;
use crate::vcs::Provenance;

/// Identity of the analyzer that produced the findings.
#[derive(Debug, Clone)]
pub struct ToolIdentity {
    pub name: String,
    pub version: String,
    pub information_uri: String,
}

/// One finding paired with the catalog index of its rule.
#[derive(Debug, Clone)]
pub struct ReportResult {
    pub finding: Finding,
    pub rule_index: usize,
}

/// The assembled document, one per pipeline run.
#[derive(Debug)]
pub struct Report {
    pub provenance: Provenance,
    pub tool: ToolIdentity,
    /// uriBaseId token that namespaces artifact locations.
    pub base_uri: String,
    /// Absolute scan root, referenced by the base URI mapping.
    pub scan_root: PathBuf,
    pub catalog: RuleCatalog,
    pub results: Vec<ReportResult>,
}

/// Build a report from findings in parse order.
///
/// Invariant on return: `results[i].rule_index` is a valid catalog index
/// and the entry's id equals `results[i].finding.rule_id`.
pub fn assemble(
    provenance: Provenance,
    tool: ToolIdentity,
    base_uri: String,
    scan_root: PathBuf,
    findings: Vec<Finding>,
) -> Report {
    let mut catalog = RuleCatalog::new();
    let mut results = Vec::with_capacity(findings.len());

    for finding in findings {
        let rule_index = catalog.intern(&finding.rule_id, || RuleDefinition {
            id: finding.rule_id.clone(),
            name: finding.rule.name.resolve(),
            description: finding.rule.description.clone(),
            help_uri: finding.rule.help_uri.clone(),
            severity: finding.rule.severity.clone(),
        });
        results.push(ReportResult {
            finding,
            rule_index,
        });
    }

    Report {
        provenance,
        tool,
        base_uri,
        scan_root,
        catalog,
        results,
    }
}
