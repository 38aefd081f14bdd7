//! AES-256-CBC encryption of the archive.
//!
//! The encrypted archive is raw CBC ciphertext with PKCS#7 padding and no
//! header, the layout `openssl enc -aes-256-cbc -K <hex> -iv <hex>` produces.
//!
//! CBC carries no authentication tag, so a wrong key is only detected
//! heuristically: a padding failure or an empty plaintext both count as a
//! key mismatch. A wrong IV with the right key only garbles the first block
//! and is not detected at all.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use tracing::trace;

use crate::core::key::KeyMaterial;
use crate::error::{KeyError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt `plaintext` under `key`.
pub fn encrypt(plaintext: &[u8], key: &KeyMaterial) -> Vec<u8> {
    trace!(plaintext_len = plaintext.len(), "encrypting");

    let ciphertext = Aes256CbcEnc::new(&(*key.key()).into(), &(*key.iv()).into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    trace!(ciphertext_len = ciphertext.len(), "encrypted");
    ciphertext
}

/// Decrypt `ciphertext` under `key`.
///
/// # Errors
///
/// Returns `KeyError::Mismatch` if the padding is invalid or the plaintext
/// is empty.
pub fn decrypt(ciphertext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    trace!(ciphertext_len = ciphertext.len(), "decrypting");

    let plaintext = Aes256CbcDec::new(&(*key.key()).into(), &(*key.iv()).into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| KeyError::Mismatch)?;

    if plaintext.is_empty() {
        return Err(KeyError::Mismatch.into());
    }

    trace!(plaintext_len = plaintext.len(), "decrypted");
    Ok(plaintext)
}
