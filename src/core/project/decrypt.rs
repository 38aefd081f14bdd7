//! Decrypt pipeline.
//!
//! assert archive exists → decrypt → reject empty plaintext → unpack →
//! copy the selected set's secrets back to their repository locations.

use std::path::PathBuf;

use tracing::{debug, info};

use super::{copy_secret, Project};
use crate::core::archive::Archiver;
use crate::core::cipher;
use crate::core::key::KeyMaterial;
use crate::error::Result;

/// Result of a successful decryption.
#[derive(Debug)]
pub struct DecryptOutcome {
    /// Name of the restored set, `None` for the default set
    pub set: Option<String>,
    /// Original paths written, relative to the project root
    pub restored: Vec<PathBuf>,
}

impl Project {
    /// Decrypt the archive and restore one set.
    ///
    /// `set` selects a named set; `None` restores the default set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSet` before touching anything if `set`
    /// isn't configured, `FileError::NotFound` if the encrypted archive or a
    /// staged secret is missing, `KeyError::Mismatch` if decryption fails or
    /// yields nothing, or an archiver / IO error.
    pub fn decrypt(
        &self,
        set: Option<&str>,
        key: &KeyMaterial,
        archiver: &dyn Archiver,
    ) -> Result<DecryptOutcome> {
        let config = &self.config;
        let selected = config.set(set)?;

        self.ensure_encrypted_archive()?;

        info!(archive = %config.encrypted_file().display(), "decrypting secrets");
        let ciphertext = std::fs::read(self.path(config.encrypted_file()))?;
        let plaintext = cipher::decrypt(&ciphertext, key)?;
        std::fs::write(self.path(config.output_file()), plaintext)?;

        info!(archive = %config.output_file().display(), "decompressing");
        archiver.unpack(&self.root, config.output_file())?;

        info!(set = selected.label(), "copying files to their destination");
        let mut restored = Vec::with_capacity(selected.original_paths().len());
        for original in selected.original_paths() {
            let staged = selected.staged_path(original);
            debug!(from = %staged.display(), to = %original.display(), "restoring");
            copy_secret(&self.path(&staged), &self.path(original))?;
            restored.push(original.clone());
        }

        Ok(DecryptOutcome {
            set: selected.name().map(str::to_string),
            restored,
        })
    }
}
