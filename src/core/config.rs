//! Configuration file management.
//!
//! Handles reading and validating `.cici.yml`. The raw document is parsed into
//! [`Config`] once, checked by [`Config::validate`], and then turned into the
//! immutable [`ResolvedConfig`](crate::core::sets::ResolvedConfig) that every
//! pipeline stage works from.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.cici.yml`
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base directory secrets are staged under (default `secrets`)
    #[serde(default)]
    pub path: Option<String>,
    /// Archive base name, without extension (default `secrets`)
    #[serde(default)]
    pub output: Option<String>,
    /// Leave `.gitignore` alone on encrypt
    #[serde(default)]
    pub skip_gitignore: bool,
    /// The unnamed set staged directly under `path`
    #[serde(default)]
    pub default: Option<DefaultSection>,
    /// Named sets, each staged under its own subdirectory
    #[serde(default)]
    pub sets: BTreeMap<String, Option<SetSection>>,
}

/// The `default:` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultSection {
    #[serde(default)]
    pub secrets: Option<Vec<String>>,
}

/// One entry under `sets:`.
///
/// Both keys are optional; an entry with no body inherits the default
/// secrets and is staged under a directory named after the set.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetSection {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub secrets: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from `.cici.yml` inside `root`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the file doesn't exist,
    /// `ConfigError::Parse` if the YAML is malformed, or a validation error.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(constants::CONFIG_FILE);
        debug!(path = %path.display(), "loading config");

        if !path.is_file() {
            return Err(ConfigError::Missing { path }.into());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::Read)?;
        let config = Self::parse(&contents)?;

        debug!(
            sets = config.sets.len(),
            default_secrets = config.default_secrets().len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Parse and validate a YAML document.
    ///
    /// An empty document is a valid, empty configuration.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Option<Self> = serde_yaml::from_str(contents).map_err(ConfigError::Parse)?;
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Base path, or the default value
    pub fn base_path(&self) -> &str {
        self.path.as_deref().unwrap_or(constants::DEFAULT_BASE_PATH)
    }

    /// Archive base name, or the default value
    pub fn output(&self) -> &str {
        self.output.as_deref().unwrap_or(constants::DEFAULT_OUTPUT)
    }

    /// Raw entries of the default set, as authored
    pub fn default_secrets(&self) -> &[String] {
        self.default
            .as_ref()
            .and_then(|d| d.secrets.as_deref())
            .unwrap_or(&[])
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - `path`, `output` and set path overrides are non-empty
    /// - `path` and set path overrides are relative without `..`
    /// - set names are non-empty
    /// - every secret is a non-empty relative path without `..`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if let Some(path) = &self.path {
            validate_directory("path", path)?;
        }
        if let Some(output) = &self.output {
            if output.trim().is_empty() {
                return Err(invalid("output", "must not be empty"));
            }
        }

        for secret in self.default_secrets() {
            validate_secret("default.secrets", secret)?;
        }

        for (name, set) in &self.sets {
            if name.trim().is_empty() {
                return Err(invalid("sets", "set name must not be empty"));
            }
            let Some(set) = set else { continue };

            if let Some(path) = &set.path {
                validate_directory(&format!("sets.{}.path", name), path)?;
            }
            for secret in set.secrets.iter().flatten() {
                validate_secret(&format!("sets.{}.secrets", name), secret)?;
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
    .into()
}

fn validate_directory(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    validate_relative(field, value, "path")
}

/// Secrets get re-rooted under a staging directory, so they must stay
/// relative and inside it.
fn validate_secret(field: &str, secret: &str) -> Result<()> {
    if secret.trim().is_empty() {
        return Err(invalid(field, "secret path must not be empty"));
    }
    validate_relative(field, secret, "secret path")
}

fn validate_relative(field: &str, value: &str, what: &str) -> Result<()> {
    for component in Path::new(value).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(invalid(field, format!("{} must be relative: {}", what, value)));
            }
            Component::ParentDir => {
                return Err(invalid(
                    field,
                    format!("{} must not contain '..': {}", what, value),
                ));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}
