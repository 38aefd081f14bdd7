//! Secret set resolution.
//!
//! Turns a validated [`Config`] into a [`ResolvedConfig`]: for the default set
//! and every named set, the secret paths as authored (original paths), the
//! directory they are staged under inside the archive, and the staged paths
//! themselves. All paths are relative to the project root.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// A group of secrets sharing one staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSet {
    name: Option<String>,
    base_directory: PathBuf,
    original_paths: Vec<PathBuf>,
}

impl SecretSet {
    /// Set name, `None` for the default set
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Directory the set is staged under
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Secret paths as they live in the repository
    pub fn original_paths(&self) -> &[PathBuf] {
        &self.original_paths
    }

    /// Secret paths as they appear inside the archive
    pub fn staged_paths(&self) -> Vec<PathBuf> {
        self.original_paths
            .iter()
            .map(|p| self.staged_path(p))
            .collect()
    }

    /// Stage a single original path under this set's directory.
    pub fn staged_path(&self, original: &Path) -> PathBuf {
        self.base_directory.join(original)
    }

    /// Display label used in output and logs.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("default")
    }
}

/// Fully resolved, immutable view of `.cici.yml`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    base_path: PathBuf,
    output_file: PathBuf,
    encrypted_file: PathBuf,
    skip_gitignore: bool,
    default_set: SecretSet,
    sets: BTreeMap<String, SecretSet>,
}

impl ResolvedConfig {
    /// Resolve every set in `config`.
    pub fn resolve(config: &Config) -> Self {
        let base_path = PathBuf::from(config.base_path());
        let default_paths: Vec<PathBuf> =
            config.default_secrets().iter().map(PathBuf::from).collect();

        let default_set = SecretSet {
            name: None,
            base_directory: base_path.clone(),
            original_paths: default_paths.clone(),
        };

        let sets = config
            .sets
            .iter()
            .map(|(name, section)| {
                let section = section.clone().unwrap_or_default();
                let directory = section.path.unwrap_or_else(|| name.clone());
                let original_paths = match section.secrets {
                    Some(secrets) => secrets.into_iter().map(PathBuf::from).collect(),
                    None => default_paths.clone(),
                };

                let set = SecretSet {
                    name: Some(name.clone()),
                    base_directory: base_path.join(directory),
                    original_paths,
                };
                (name.clone(), set)
            })
            .collect();

        let output_file = PathBuf::from(format!(
            "{}.{}",
            config.output(),
            constants::ARCHIVE_EXTENSION
        ));
        let encrypted_file = PathBuf::from(format!(
            "{}.{}",
            output_file.display(),
            constants::ENCRYPTED_EXTENSION
        ));

        Self {
            base_path,
            output_file,
            encrypted_file,
            skip_gitignore: config.skip_gitignore,
            default_set,
            sets,
        }
    }

    /// Directory packed into the archive
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Plaintext archive, e.g. `secrets.tar`
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Encrypted archive, e.g. `secrets.tar.enc`
    pub fn encrypted_file(&self) -> &Path {
        &self.encrypted_file
    }

    pub fn skip_gitignore(&self) -> bool {
        self.skip_gitignore
    }

    pub fn default_set(&self) -> &SecretSet {
        &self.default_set
    }

    /// Named sets keyed by name
    pub fn sets(&self) -> &BTreeMap<String, SecretSet> {
        &self.sets
    }

    /// Look up a set; `None` selects the default set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSet` if the name isn't configured.
    pub fn set(&self, name: Option<&str>) -> Result<&SecretSet> {
        match name {
            None => Ok(&self.default_set),
            Some(name) => self
                .sets
                .get(name)
                .ok_or_else(|| ConfigError::UnknownSet(name.to_string()).into()),
        }
    }

    /// Staging directory of a named set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSet` if the name isn't configured.
    pub fn path_for_set(&self, name: &str) -> Result<&Path> {
        self.set(Some(name)).map(SecretSet::base_directory)
    }

    /// Every staged path across the default and named sets, deduplicated.
    ///
    /// This is the manifest that must exist before packing.
    pub fn all_secrets(&self) -> Vec<PathBuf> {
        dedup(self.all_sets().flat_map(|set| set.staged_paths()))
    }

    /// Every original path across the default and named sets, deduplicated.
    pub fn all_original_paths(&self) -> Vec<PathBuf> {
        dedup(
            self.all_sets()
                .flat_map(|set| set.original_paths().iter().cloned()),
        )
    }

    fn all_sets(&self) -> impl Iterator<Item = &SecretSet> {
        std::iter::once(&self.default_set).chain(self.sets.values())
    }
}

/// Keep the first occurrence of each path, preserving order.
fn dedup(paths: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths.filter(|p| seen.insert(p.clone())).collect()
}
