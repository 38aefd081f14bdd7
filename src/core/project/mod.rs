//! Project operations.
//!
//! A [`Project`] is a directory holding `.cici.yml`, loaded once into a
//! [`ResolvedConfig`]. The encrypt and decrypt pipelines hang off it and
//! resolve every path against its root, never against the process's
//! working directory.

mod copy;
mod decrypt;
mod encrypt;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::Config;
use crate::core::sets::ResolvedConfig;
use crate::error::{FileError, Result};

pub use copy::copy_secret;
pub use decrypt::DecryptOutcome;
pub use encrypt::EncryptOutcome;

/// A project with a loaded configuration.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ResolvedConfig,
}

impl Project {
    /// Open the project rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `.cici.yml` doesn't exist, or a parse
    /// or validation error.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = Config::load(&root)?;
        Ok(Self::from_config(root, &config))
    }

    /// Build a project from an already parsed configuration.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        let root = root.into();
        let config = ResolvedConfig::resolve(config);
        debug!(root = %root.display(), sets = config.sets().len(), "project opened");
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Absolute location of a project-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Fail unless the encrypted archive is present.
    ///
    /// # Errors
    ///
    /// Returns `FileError::NotFound` naming the encrypted archive.
    pub fn ensure_encrypted_archive(&self) -> Result<()> {
        let encrypted = self.config.encrypted_file();
        if !self.path(encrypted).is_file() {
            return Err(FileError::not_found(encrypted, "encrypted secrets file").into());
        }
        Ok(())
    }
}
