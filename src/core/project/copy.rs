//! Restore copy.
//!
//! Moves unpacked secrets from their staging location back to where they
//! live in the repository. Directories are merged into the destination and
//! existing files are overwritten.

use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use crate::error::{FileError, Result};

/// Copy a file or directory from `source` to `destination`.
///
/// Intermediate directories are created as needed.
///
/// # Errors
///
/// Returns `FileError::NotFound` if `source` doesn't exist, or an IO error.
pub fn copy_secret(source: &Path, destination: &Path) -> Result<()> {
    if !source.exists() {
        return Err(FileError::not_found(source, "staged secret").into());
    }

    if source.is_dir() {
        for entry in WalkDir::new(source) {
            let entry = entry.map_err(std::io::Error::from)?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            let target = destination.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else {
                copy_file(entry.path(), &target)?;
            }
        }
        return Ok(());
    }

    copy_file(source, destination)
}

fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    trace!(from = %source.display(), to = %destination.display(), "copying");
    std::fs::copy(source, destination)?;
    Ok(())
}
