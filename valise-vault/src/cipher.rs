//! AES-256-GCM sealing with self-contained nonce framing.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::derivation::KEY_LEN;
use crate::error::{Result, VaultError};

/// AES-GCM nonce length
pub const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` under `key`, returning `[nonce | ciphertext]` so
/// the frame can be opened without external state.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionError(format!("AES init failed: {e}")))?;
    let nonce: [u8; NONCE_LEN] = Aes256Gcm::generate_nonce(&mut OsRng).into();
    let ciphertext = cipher
        .encrypt(&nonce.into(), plaintext)
        .map_err(|e| VaultError::EncryptionError(format!("encryption failed: {e}")))?;

    let mut framed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    framed.extend_from_slice(&nonce);
    framed.extend_from_slice(&ciphertext);
    Ok(framed)
}

/// Open a `[nonce | ciphertext]` frame produced by [`seal`].
///
/// Fails on any integrity mismatch; truncated frames are rejected before
/// the cipher runs.
pub fn open(key: &[u8; KEY_LEN], framed: &[u8]) -> Result<Vec<u8>> {
    if framed.len() < NONCE_LEN {
        return Err(VaultError::DecryptionError(
            "frame shorter than the nonce".to_string(),
        ));
    }

    let (nonce, ciphertext) = framed.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::DecryptionError(format!("AES init failed: {e}")))?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| VaultError::DecryptionError("authentication failed".to_string()))
}
