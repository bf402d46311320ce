//! External analyzer invocation.
//!
//! Each invocation is scoped acquisition: spawn, wait for exit, buffer the
//! full output, release. A missing executable or non-zero exit does not
//! abort the pipeline at this layer — the captured bytes (possibly empty)
//! are returned and the parser treats empty output as zero findings. The
//! ambiguity between "tool crashed" and "tool found nothing" is inherent
//! to that contract; both cases are logged at warn.

use std::path::Path;
use std::process::Command;

/// Which stream an analyzer family writes its findings to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    Stdout,
    Stderr,
}

impl std::fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::Stderr => write!(f, "stderr"),
        }
    }
}

/// Run `command args... target` synchronously and capture one stream.
pub fn run_analyzer(
    command: &str,
    args: &[String],
    target: &Path,
    channel: OutputChannel,
) -> Vec<u8> {
    let output = Command::new(command).args(args).arg(target).output();

    match output {
        Ok(out) => {
            if !out.status.success() {
                tracing::warn!(
                    command,
                    status = %out.status,
                    "analyzer exited non-zero; proceeding with captured output"
                );
            }
            match channel {
                OutputChannel::Stdout => out.stdout,
                OutputChannel::Stderr => out.stderr,
            }
        }
        Err(e) => {
            tracing::warn!(command, error = %e, "failed to spawn analyzer");
            Vec::new()
        }
    }
}

/// Run `command --version` and return the trimmed stdout, empty on failure.
pub fn probe_version(command: &str) -> String {
    match Command::new(command).arg("--version").output() {
        Ok(out) => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        Err(e) => {
            tracing::warn!(command, error = %e, "version probe failed");
            String::new()
        }
    }
}

/// Split a flag string on spaces. Arguments containing literal spaces
/// cannot be expressed through this interface.
pub fn split_args(args: &str) -> Vec<String> {
    args.split(' ')
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}
