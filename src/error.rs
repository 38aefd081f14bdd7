//! Error types.
//!
//! One enum per concern, folded into [`Error`] so command handlers can use `?`
//! everywhere and `main` can attach hints by matching on the variant.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Top-level error returned by every fallible operation in cici.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Problems loading or interpreting `.cici.yml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot find config file {} in current directory", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("set '{0}' does not exist in config file")]
    UnknownSet(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// A file the pipeline depends on is absent.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("{what} at path {} does not exist", path.display())]
    NotFound { path: PathBuf, what: &'static str },
}

impl FileError {
    pub fn not_found(path: impl Into<PathBuf>, what: &'static str) -> Self {
        Self::NotFound {
            path: path.into(),
            what,
        }
    }
}

/// Packing or unpacking through the external archiver failed.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("command `{command}` failed ({status}){}", format_stderr(stderr))]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("could not run `{program}`: {source}")]
    CommandFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Key material could not be obtained or does not match the archive.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("wrong key/iv pair for decryption")]
    Mismatch,

    #[error("{what} is not valid base64")]
    InvalidEncoding { what: &'static str },

    #[error("{what} must be {expected} bytes, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("forgot to specify environment variable {0}")]
    EnvMissing(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
