pub mod sarif;

use std::path::Path;

use crate::error::Result;

/// Write the rendered document to a file (overwriting any existing
/// content) or to stdout. No atomic replacement: a failure mid-write can
/// leave a truncated file.
pub fn write(rendered: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}
