use serde_json::{json, Value};

use crate::error::Result;
use crate::report::Report;

const SCHEMA_URI: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Render an assembled report as SARIF 2.1.0.
///
/// The rules array is populated before any result references it by index;
/// `ruleIndex` values are the catalog positions assigned during assembly.
pub fn render(report: &Report) -> Result<String> {
    let rules: Vec<Value> = report
        .catalog
        .rules()
        .iter()
        .map(|rule| {
            let mut entry = json!({
                "id": rule.id,
                "name": rule.name,
                "shortDescription": {
                    "text": rule.description.as_deref().unwrap_or(&rule.name),
                },
            });
            if let Some(help_uri) = &rule.help_uri {
                entry["helpUri"] = json!(help_uri);
            }
            if let Some(severity) = &rule.severity {
                entry["properties"] = json!({ "Severity": severity });
            }
            entry
        })
        .collect();

    let results: Vec<Value> = report
        .results
        .iter()
        .map(|result| {
            json!({
                "ruleId": result.finding.rule_id,
                "ruleIndex": result.rule_index,
                "message": { "text": result.finding.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": result.finding.file,
                            "uriBaseId": report.base_uri,
                        },
                        "region": {
                            "startLine": result.finding.line,
                        },
                    },
                }],
            })
        })
        .collect();

    // The uriBaseId token is caller-supplied, so the mapping key is built
    // explicitly rather than through the json! literal.
    let mut base_ids = serde_json::Map::new();
    base_ids.insert(
        report.base_uri.clone(),
        json!({ "uri": format!("FILE://{}/", report.scan_root.display()) }),
    );

    let sarif = json!({
        "$schema": SCHEMA_URI,
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": report.tool.name,
                    "version": report.tool.version,
                    "informationUri": report.tool.information_uri,
                    "rules": rules,
                },
            },
            "originalUriBaseIds": base_ids,
            "versionControlProvenance": [{
                "repositoryUri": report.provenance.repository_uri,
                "revisionId": report.provenance.revision_id,
                "branch": report.provenance.branch,
                "mappedTo": { "uriBaseId": report.base_uri },
            }],
            "artifacts": [],
            "results": results,
        }],
    });

    let output = serde_json::to_string_pretty(&sarif)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Finding, RuleName, RuleSeed};
    use crate::report::{assemble, ToolIdentity};
    use crate::vcs::Provenance;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn sample_report() -> Report {
        let findings = vec![
            Finding {
                rule_id: "CWE457".to_string(),
                rule: RuleSeed {
                    name: RuleName::FromIdentifier("uninitVariable".to_string()),
                    description: Some("Uninitialized variable: x".to_string()),
                    help_uri: None,
                    severity: Some("error".to_string()),
                },
                message: "Uninitialized variable: x".to_string(),
                file: "src/a.c".to_string(),
                line: 10,
                severity: Some("error".to_string()),
            },
            Finding {
                rule_id: "CWE457".to_string(),
                rule: RuleSeed {
                    name: RuleName::FromIdentifier("uninitVariable".to_string()),
                    description: Some("Uninitialized variable: y".to_string()),
                    help_uri: None,
                    severity: Some("error".to_string()),
                },
                message: "Uninitialized variable: y".to_string(),
                file: "src/b.c".to_string(),
                line: 3,
                severity: Some("error".to_string()),
            },
        ];
        assemble(
            Provenance {
                repository_uri: "git@example.com:x/proj.git".to_string(),
                revision_id: "abc123".to_string(),
                branch: "main".to_string(),
            },
            ToolIdentity {
                name: "CppCheck".to_string(),
                version: "2.3".to_string(),
                information_uri: "http://cppcheck.sourceforge.net".to_string(),
            },
            "SRCROOT".to_string(),
            PathBuf::from("/home/x/proj"),
            findings,
        )
    }

    #[test]
    fn document_shape_matches_schema() {
        let rendered = render(&sample_report()).unwrap();
        let doc: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(doc["version"], "2.1.0");
        let run = &doc["runs"][0];
        assert_eq!(run["tool"]["driver"]["name"], "CppCheck");
        assert_eq!(run["tool"]["driver"]["version"], "2.3");
        assert_eq!(
            run["originalUriBaseIds"]["SRCROOT"]["uri"],
            "FILE:///home/x/proj/"
        );
        assert_eq!(
            run["versionControlProvenance"][0]["revisionId"],
            "abc123"
        );
        assert_eq!(
            run["versionControlProvenance"][0]["mappedTo"]["uriBaseId"],
            "SRCROOT"
        );
        assert_eq!(run["artifacts"], json!([]));
    }

    #[test]
    fn results_reference_populated_rules_by_index() {
        let rendered = render(&sample_report()).unwrap();
        let doc: Value = serde_json::from_str(&rendered).unwrap();
        let run = &doc["runs"][0];

        let rules = run["tool"]["driver"]["rules"].as_array().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0]["id"], "CWE457");
        assert_eq!(rules[0]["name"], "Uninit Variable");
        assert_eq!(rules[0]["shortDescription"]["text"], "Uninitialized variable: x");
        assert_eq!(rules[0]["properties"]["Severity"], "error");

        let results = run["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        for result in results {
            let index = result["ruleIndex"].as_u64().unwrap() as usize;
            assert_eq!(rules[index]["id"], result["ruleId"]);
        }
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "src/a.c"
        );
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["region"]["startLine"],
            10
        );
        assert_eq!(
            results[1]["locations"][0]["physicalLocation"]["artifactLocation"]["uriBaseId"],
            "SRCROOT"
        );
    }

    #[test]
    fn help_uri_emitted_only_when_present() {
        let rendered = render(&sample_report()).unwrap();
        let doc: Value = serde_json::from_str(&rendered).unwrap();
        let rule = &doc["runs"][0]["tool"]["driver"]["rules"][0];
        assert!(rule.get("helpUri").is_none());
    }

    #[test]
    fn empty_report_renders_empty_rules_and_results() {
        let report = assemble(
            Provenance::default(),
            ToolIdentity {
                name: "codespell".to_string(),
                version: String::new(),
                information_uri: "https://github.com/codespell-project/codespell".to_string(),
            },
            "SRCROOT".to_string(),
            PathBuf::from("/p"),
            Vec::new(),
        );
        let doc: Value = serde_json::from_str(&render(&report).unwrap()).unwrap();
        assert_eq!(doc["runs"][0]["results"], json!([]));
        assert_eq!(doc["runs"][0]["tool"]["driver"]["rules"], json!([]));
    }
}
