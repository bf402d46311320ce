//! Structured analyzer family (cppcheck XML version 2).
//!
//! The document header carries the tool version; each `<error>` element
//! carries a camelCase short id, a CWE number, a verbose message, a
//! severity tag, and nested `<location>` elements. The rule identifier is
//! `CWE<number>`; the display name is derived from the short id at
//! catalog-intern time.

use serde::Deserialize;

use crate::error::Result;
use crate::invoke::OutputChannel;
use crate::parser::{
    Analyzer, Family, Finding, ParseContext, ParsedOutput, RuleName, RuleSeed,
};

pub struct CppcheckAnalyzer;

impl Analyzer for CppcheckAnalyzer {
    fn family(&self) -> Family {
        Family::Cppcheck
    }

    fn tool_name(&self) -> &'static str {
        "CppCheck"
    }

    fn information_uri(&self) -> &'static str {
        "http://cppcheck.sourceforge.net"
    }

    fn default_command(&self) -> &'static str {
        "cppcheck"
    }

    fn default_args(&self) -> &'static str {
        "--xml -q"
    }

    fn channel(&self) -> OutputChannel {
        OutputChannel::Stderr
    }

    fn embeds_version(&self) -> bool {
        true
    }

    fn parse(&self, raw: &[u8], ctx: &ParseContext) -> Result<ParsedOutput> {
        let text = String::from_utf8_lossy(raw);
        // Empty capture means the tool found nothing or never ran;
        // either way there are zero findings.
        if text.trim().is_empty() {
            return Ok(ParsedOutput::default());
        }

        let document: ResultsDocument = quick_xml::de::from_str(&text)?;
        let mut findings = Vec::new();

        for error in document.errors.errors {
            // Informational entries (missing includes, checker summaries)
            // carry no CWE or location; they are not findings.
            let Some(cwe) = error.cwe else {
                tracing::warn!(id = %error.id, "skipping error without CWE number");
                continue;
            };
            let Some(location) = error.locations.first() else {
                tracing::warn!(id = %error.id, "skipping error without location");
                continue;
            };

            findings.push(Finding {
                rule_id: format!("CWE{cwe}"),
                rule: RuleSeed {
                    name: RuleName::FromIdentifier(error.id.clone()),
                    description: Some(error.verbose.clone()),
                    help_uri: None,
                    severity: Some(error.severity.clone()),
                },
                message: error.verbose,
                file: ctx.relativize(&location.file),
                line: location.line,
                severity: Some(error.severity),
            });
        }

        Ok(ParsedOutput {
            findings,
            tool_version: Some(document.cppcheck.version),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ResultsDocument {
    cppcheck: CppcheckHeader,
    errors: ErrorList,
}

#[derive(Debug, Deserialize)]
struct CppcheckHeader {
    #[serde(rename = "@version")]
    version: String,
}

#[derive(Debug, Deserialize)]
struct ErrorList {
    #[serde(rename = "error", default)]
    errors: Vec<ErrorElement>,
}

#[derive(Debug, Deserialize)]
struct ErrorElement {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@severity")]
    severity: String,
    #[serde(rename = "@verbose")]
    verbose: String,
    #[serde(rename = "@cwe")]
    cwe: Option<u32>,
    #[serde(rename = "location", default)]
    locations: Vec<LocationElement>,
}

#[derive(Debug, Deserialize)]
struct LocationElement {
    #[serde(rename = "@file")]
    file: String,
    #[serde(rename = "@line")]
    line: u32,
}
