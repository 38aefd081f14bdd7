//! Packing the secrets directory into a single archive.
//!
//! The packing itself is delegated to an external command. [`Archiver`] is
//! the seam; [`Tar`] runs the system `tar`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, trace};

use crate::error::{ArchiveError, Result};

/// Bundles a directory into one file and unpacks it again.
///
/// All paths are relative to `root`, which is the directory the command runs in.
pub trait Archiver {
    /// Pack `directory` recursively into `archive`.
    fn pack(&self, root: &Path, archive: &Path, directory: &Path) -> Result<()>;

    /// Unpack `archive` into `root`.
    fn unpack(&self, root: &Path, archive: &Path) -> Result<()>;
}

/// Archiver backed by the `tar` CLI
#[derive(Debug, Clone)]
pub struct Tar {
    program: PathBuf,
}

impl Tar {
    /// Locate `tar` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::CommandFailure` if it can't be found.
    pub fn locate() -> Result<Self> {
        let program = which::which("tar").map_err(|e| ArchiveError::CommandFailure {
            program: "tar".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, e),
        })?;
        debug!(program = %program.display(), "found tar");
        Ok(Self { program })
    }

    /// Use a specific tar-compatible binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, root: &Path, args: &[&OsStr]) -> Result<()> {
        let command = std::iter::once(self.program.as_os_str())
            .chain(args.iter().copied())
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %command, "running command");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(root)
            .output()
            .map_err(|source| ArchiveError::CommandFailure {
                program: self.program.display().to_string(),
                source,
            })?;

        // GNU tar lists to stdout, bsdtar to stderr
        for line in String::from_utf8_lossy(&output.stdout)
            .lines()
            .chain(String::from_utf8_lossy(&output.stderr).lines())
        {
            trace!(entry = line, "tar");
        }

        if !output.status.success() {
            return Err(ArchiveError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        Ok(())
    }
}

impl Archiver for Tar {
    fn pack(&self, root: &Path, archive: &Path, directory: &Path) -> Result<()> {
        self.run(
            root,
            &[OsStr::new("-cvf"), archive.as_os_str(), directory.as_os_str()],
        )
    }

    fn unpack(&self, root: &Path, archive: &Path) -> Result<()> {
        self.run(root, &[OsStr::new("-xvf"), archive.as_os_str()])
    }
}
