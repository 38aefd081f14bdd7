//! Encrypt pipeline.
//!
//! assert secrets exist → determine key → pack → sync `.gitignore` →
//! encrypt. Strictly sequential; the first failure aborts the run.

use std::path::PathBuf;

use tracing::{debug, info};

use super::Project;
use crate::core::archive::Archiver;
use crate::core::cipher;
use crate::core::constants;
use crate::core::gitignore;
use crate::core::key::{self, KeyMaterial, KeyPrompt};
use crate::error::{FileError, Result};

/// Result of a successful encryption.
#[derive(Debug)]
pub struct EncryptOutcome {
    /// Encrypted archive, relative to the project root
    pub encrypted_file: PathBuf,
    /// The freshly generated pair, only on a first-time encryption
    pub generated: Option<KeyMaterial>,
    /// Entries prepended to `.gitignore`
    pub gitignore_added: Vec<String>,
}

impl Project {
    /// Pack and encrypt every configured secret.
    ///
    /// On a first-time encryption a new key/IV is generated and returned in
    /// the outcome; otherwise `prompt` is asked for the previous pair, which
    /// must decrypt the existing encrypted archive.
    ///
    /// # Errors
    ///
    /// Returns `FileError::NotFound` for a missing secret, `KeyError::Mismatch`
    /// if the supplied pair is wrong, or an archiver / IO error. Nothing is
    /// packed or written before the secrets and the key have been checked.
    pub fn encrypt(&self, archiver: &dyn Archiver, prompt: &dyn KeyPrompt) -> Result<EncryptOutcome> {
        self.assert_secrets_exist()?;

        let config = &self.config;
        let determined = key::determine(
            &self.root,
            config.output_file(),
            config.encrypted_file(),
            prompt,
        )?;

        info!(
            archive = %config.output_file().display(),
            directory = %config.base_path().display(),
            "compressing secrets"
        );
        archiver.pack(&self.root, config.output_file(), config.base_path())?;

        let gitignore_added = self.sync_gitignore()?;

        info!(
            from = %config.output_file().display(),
            to = %config.encrypted_file().display(),
            "encrypting"
        );
        let plaintext = std::fs::read(self.path(config.output_file()))?;
        let ciphertext = cipher::encrypt(&plaintext, &determined.material);
        std::fs::write(self.path(config.encrypted_file()), ciphertext)?;

        Ok(EncryptOutcome {
            encrypted_file: config.encrypted_file().to_path_buf(),
            generated: determined.first_time.then_some(determined.material),
            gitignore_added,
        })
    }

    fn assert_secrets_exist(&self) -> Result<()> {
        debug!(
            base = %self.config.base_path().display(),
            "checking secrets exist"
        );

        for secret in self.config.all_secrets() {
            let exists = self.path(&secret).exists();
            debug!(path = %secret.display(), exists, "checking secret");
            if !exists {
                return Err(FileError::not_found(secret, "secret file or directory").into());
            }
        }

        Ok(())
    }

    /// Prepend the plaintext archive, the staging directory and every
    /// original secret path to `.gitignore`. The encrypted archive must stay
    /// tracked, so it is never added.
    fn sync_gitignore(&self) -> Result<Vec<String>> {
        let config = &self.config;
        if config.skip_gitignore() {
            debug!("skip_gitignore set, leaving ignore file alone");
            return Ok(Vec::new());
        }

        let additions: Vec<String> = [config.output_file(), config.base_path()]
            .into_iter()
            .map(|p| p.to_path_buf())
            .chain(config.all_original_paths())
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

        let added = gitignore::sync(
            &self.path(constants::GITIGNORE_FILE),
            &additions,
            &config.encrypted_file().to_string_lossy(),
        )?;

        debug!(added = added.len(), "ignore file synchronized");
        Ok(added)
    }
}
