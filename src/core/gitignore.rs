//! `.gitignore` merging.
//!
//! Missing entries are prepended as a block followed by a blank line; the
//! existing content is kept byte-for-byte after it. Nothing is ever removed
//! or reordered, and the file is not rewritten when nothing is missing.
//!
//! The file is handled as raw bytes split on `\n`, so ignore files that are
//! not valid UTF-8 merge like any other.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Outcome of a merge that added at least one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    /// Entries prepended, in order
    pub added: Vec<String>,
    /// Full new file contents
    pub contents: Vec<u8>,
}

/// Entries from `additions` that don't already appear in `existing`.
///
/// Lines are compared after trimming ASCII whitespace. Duplicates within
/// `additions` are reported once, in first-seen order. Blank additions are
/// ignored.
pub fn missing_entries<'a>(
    existing: &[u8],
    additions: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut present: HashSet<&[u8]> = existing.split(|&b| b == b'\n').map(trim).collect();

    let mut missing = Vec::new();
    for entry in additions {
        let entry = entry.trim();
        if entry.is_empty() || !present.insert(entry.as_bytes()) {
            continue;
        }
        missing.push(entry.to_string());
    }
    missing
}

/// Merge `additions` into `existing`.
///
/// Returns `None` when every entry is already present.
pub fn merge<'a>(existing: &[u8], additions: impl IntoIterator<Item = &'a str>) -> Option<Merged> {
    let added = missing_entries(existing, additions);
    if added.is_empty() {
        return None;
    }

    let mut contents = added.join("\n").into_bytes();
    contents.extend_from_slice(b"\n\n");
    contents.extend_from_slice(existing);
    Some(Merged { added, contents })
}

fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}

/// Merge `additions` into the ignore file at `path`, never adding `exclude`.
///
/// Does nothing if the file doesn't exist.
///
/// # Returns
///
/// The entries that were added.
///
/// # Errors
///
/// Returns error if the file cannot be read or written.
pub fn sync(path: &Path, additions: &[String], exclude: &str) -> Result<Vec<String>> {
    if !path.is_file() {
        debug!(path = %path.display(), "no ignore file, skipping");
        return Ok(Vec::new());
    }

    let existing = std::fs::read(path)?;
    let exclude = exclude.trim();
    let candidates = additions
        .iter()
        .map(|a| a.as_str())
        .filter(|a| a.trim() != exclude);

    match merge(&existing, candidates) {
        None => {
            debug!(path = %path.display(), "ignore file already up to date");
            Ok(Vec::new())
        }
        Some(merged) => {
            debug!(path = %path.display(), added = merged.added.len(), "writing ignore entries");
            std::fs::write(path, &merged.contents)?;
            Ok(merged.added)
        }
    }
}
