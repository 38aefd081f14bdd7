//! Constants used throughout cici.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (.cici.yml).
pub const CONFIG_FILE: &str = ".cici.yml";

/// Base directory secrets are staged under when `path` is not configured.
pub const DEFAULT_BASE_PATH: &str = "secrets";

/// Archive base name when `output` is not configured.
pub const DEFAULT_OUTPUT: &str = "secrets";

/// Extension of the plaintext archive.
pub const ARCHIVE_EXTENSION: &str = "tar";

/// Extension appended to the plaintext archive name for the encrypted one.
pub const ENCRYPTED_EXTENSION: &str = "enc";

/// Ignore file merged on encrypt.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Environment variable holding the base64 AES key on CI.
pub const DECRYPT_KEY_ENV_VAR: &str = "CICI_DECRYPT_KEY";

/// Environment variable holding the base64 AES IV on CI.
pub const DECRYPT_IV_ENV_VAR: &str = "CICI_DECRYPT_IV";

/// Environment variable overriding the log filter.
pub const LOG_ENV_VAR: &str = "CICI_LOG";
