//! Line-by-line file reading shared by userset/termset loading.

use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a UTF-8 text file and yields trimmed, non-blank lines. Blank and
/// whitespace-only lines are silently skipped rather than surfaced as
/// errors.
pub fn read_nonblank_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.wrap_err_with(|| format!("Failed to read line from {}", path.display()))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}
