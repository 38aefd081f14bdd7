//! Key material and its lifecycle across encryptions.
//!
//! A key/IV pair is generated on the first encryption of a project and must
//! be re-supplied, unchanged, on every later one: CI only ever holds the
//! pair that was reported the first time. [`determine`] decides which case
//! applies and [`verify_key_material`] guards the reuse path by trial
//! decryption of the archive already on disk.

use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, info};
use zeroize::Zeroize;

use crate::core::cipher;
use crate::core::constants;
use crate::error::{FileError, KeyError, Result};

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// CBC IV size in bytes.
pub const IV_SIZE: usize = 16;

/// A 256-bit key and 128-bit IV, held only in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    key: [u8; KEY_SIZE],
    iv: [u8; IV_SIZE],
}

impl KeyMaterial {
    pub fn new(key: [u8; KEY_SIZE], iv: [u8; IV_SIZE]) -> Self {
        Self { key, iv }
    }

    /// Generate a fresh random pair from the OS RNG.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        let mut iv = [0u8; IV_SIZE];
        OsRng.fill_bytes(&mut key);
        OsRng.fill_bytes(&mut iv);
        Self { key, iv }
    }

    /// Decode a base64 key and IV.
    ///
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidEncoding` or `KeyError::InvalidLength`.
    pub fn from_base64(key: &str, iv: &str) -> Result<Self> {
        Ok(Self {
            key: decode_exact("key", key)?,
            iv: decode_exact("iv", iv)?,
        })
    }

    /// Read the pair from `CICI_DECRYPT_KEY` and `CICI_DECRYPT_IV`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::EnvMissing` naming the first absent variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let key = lookup(constants::DECRYPT_KEY_ENV_VAR)
            .ok_or(KeyError::EnvMissing(constants::DECRYPT_KEY_ENV_VAR))?;
        let iv = lookup(constants::DECRYPT_IV_ENV_VAR)
            .ok_or(KeyError::EnvMissing(constants::DECRYPT_IV_ENV_VAR))?;
        Self::from_base64(&key, &iv)
    }

    pub fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }

    pub fn key_base64(&self) -> String {
        STANDARD.encode(self.key)
    }

    pub fn iv_base64(&self) -> String {
        STANDARD.encode(self.iv)
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key", &"[redacted]")
            .field("iv", &"[redacted]")
            .finish()
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
    }
}

fn decode_exact<const N: usize>(what: &'static str, encoded: &str) -> Result<[u8; N]> {
    let mut bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| KeyError::InvalidEncoding { what })?;

    if bytes.len() != N {
        let actual = bytes.len();
        bytes.zeroize();
        return Err(KeyError::InvalidLength {
            what,
            expected: N,
            actual,
        }
        .into());
    }

    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    bytes.zeroize();
    Ok(out)
}

/// Source of the previously used key/IV on the reuse path.
pub trait KeyPrompt {
    /// Ask the operator for one base64 value.
    fn ask(&self, label: &str) -> Result<String>;
}

/// Key material chosen for one encryption.
#[derive(Debug)]
pub struct DeterminedKey {
    pub material: KeyMaterial,
    /// True when the pair was generated by this run and must be reported.
    pub first_time: bool,
}

/// Pick the key for an encryption.
///
/// A project with no plaintext archive under `root` is encrypted for the
/// first time and gets a fresh pair, whether or not an encrypted archive is
/// present. Otherwise the operator is asked for the previous pair, which is
/// verified against the encrypted archive before it is accepted.
///
/// # Errors
///
/// Returns `FileError::NotFound` if a plaintext archive exists without its
/// encrypted sibling, or `KeyError::Mismatch` if the supplied pair doesn't
/// decrypt the encrypted archive.
pub fn determine(
    root: &Path,
    output_file: &Path,
    encrypted_file: &Path,
    prompt: &dyn KeyPrompt,
) -> Result<DeterminedKey> {
    let plaintext_path = root.join(output_file);
    let encrypted_path = root.join(encrypted_file);

    if !plaintext_path.exists() {
        info!(archive = %output_file.display(), "no previous archive, generating new key/iv");
        return Ok(DeterminedKey {
            material: KeyMaterial::generate(),
            first_time: true,
        });
    }

    debug!(archive = %encrypted_path.display(), "previous archive found, reusing key/iv");
    if !encrypted_path.is_file() {
        return Err(FileError::not_found(encrypted_file, "encrypted secrets file").into());
    }

    let key = prompt.ask("Key used for the previous encryption (base64)")?;
    let iv = prompt.ask("IV used for the previous encryption (base64)")?;
    let candidate = KeyMaterial::from_base64(&key, &iv)?;

    let encrypted = std::fs::read(&encrypted_path)?;
    let material = verify_key_material(&encrypted, candidate)?;

    Ok(DeterminedKey {
        material,
        first_time: false,
    })
}

/// Accept `candidate` only if it decrypts `encrypted` to a non-empty plaintext.
///
/// # Errors
///
/// Returns `KeyError::Mismatch` otherwise.
pub fn verify_key_material(encrypted: &[u8], candidate: KeyMaterial) -> Result<KeyMaterial> {
    let mut trial = cipher::decrypt(encrypted, &candidate)?;
    trial.zeroize();
    debug!("key/iv verified against previous archive");
    Ok(candidate)
}
