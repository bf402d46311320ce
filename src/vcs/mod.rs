//! Version-control provenance for the scanned path.
//!
//! The report consumes repository identity as three opaque strings; any
//! query that fails (no git, not a repository, no remote) yields an empty
//! string rather than an error, matching the best-effort nature of
//! provenance metadata.

use std::path::Path;
use std::process::Command;

/// Repository identity attached to a report for traceability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub repository_uri: String,
    pub revision_id: String,
    pub branch: String,
}

/// Resolve provenance for `path` by querying git.
pub fn read(path: &Path) -> Provenance {
    Provenance {
        repository_uri: git_query(path, &["remote", "get-url", "origin"]),
        revision_id: git_query(path, &["rev-parse", "HEAD"]),
        branch: git_query(path, &["branch", "--show-current"]),
    }
}

fn git_query(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(path)
        .args(args)
        .output();

    match output {
        Ok(out) => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, query = ?args, "git query failed");
            String::new()
        }
    }
}
