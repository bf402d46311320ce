//! Line-oriented analyzer family (codespell).
//!
//! Each non-empty output line encodes one finding as three colon-separated
//! fields: absolute file path, line number, message. The format never
//! contains a literal `:` inside the path or message; a line with any
//! other field count is a parse error rather than a guess at field
//! boundaries. The tool reports no severity and its version is not part
//! of the finding stream, so it is probed separately.

use crate::error::{BridgeError, Result};
use crate::invoke::OutputChannel;
use crate::parser::{
    Analyzer, Family, Finding, ParseContext, ParsedOutput, RuleName, RuleSeed,
};

const RULE_ID: &str = "CS0001";
const HELP_URI: &str = "https://github.com/codespell-project/codespell#readme";

pub struct CodespellAnalyzer;

impl Analyzer for CodespellAnalyzer {
    fn family(&self) -> Family {
        Family::Codespell
    }

    fn tool_name(&self) -> &'static str {
        "codespell"
    }

    fn information_uri(&self) -> &'static str {
        "https://github.com/codespell-project/codespell"
    }

    fn default_command(&self) -> &'static str {
        "codespell"
    }

    fn default_args(&self) -> &'static str {
        "-q 3"
    }

    fn channel(&self) -> OutputChannel {
        OutputChannel::Stdout
    }

    fn embeds_version(&self) -> bool {
        false
    }

    fn parse(&self, raw: &[u8], ctx: &ParseContext) -> Result<ParsedOutput> {
        let text = String::from_utf8_lossy(raw);
        let mut findings = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(':').map(str::trim).collect();
            let [file, line_no, msg] = fields.as_slice() else {
                return Err(BridgeError::Parse {
                    analyzer: self.tool_name().to_string(),
                    message: format!(
                        "expected 3 colon-separated fields, got {}: {line:?}",
                        fields.len()
                    ),
                });
            };

            // Malformed line numbers skip the record instead of failing
            // the whole run.
            let line_number: u32 = match line_no.parse() {
                Ok(n) => n,
                Err(_) => {
                    tracing::warn!(line, "skipping record with non-integer line number");
                    continue;
                }
            };

            findings.push(Finding {
                rule_id: RULE_ID.to_string(),
                rule: RuleSeed {
                    name: RuleName::Literal("SpellingMistake"),
                    description: Some("Probable spelling mistake".to_string()),
                    help_uri: Some(HELP_URI.to_string()),
                    severity: Some("style".to_string()),
                },
                message: format!("Possible spelling mistake: {msg}."),
                file: ctx.relativize(file),
                line: line_number,
                severity: None,
            });
        }

        Ok(ParsedOutput {
            findings,
            tool_version: None,
        })
    }
}
