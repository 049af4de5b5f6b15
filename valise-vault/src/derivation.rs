//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA256 with a fixed iteration count; deliberately slower
//! than a plain hash. Deterministic for fixed (password, salt) so the two
//! ends of an encrypted stream derive the same key.

use hmac::Hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::error::{Result, VaultError};

/// Number of PBKDF2 iterations for key derivation
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length, also the size of the header on password-derived streams
pub const SALT_LEN: usize = 16;

/// Symmetric key length (AES-256-GCM)
pub const KEY_LEN: usize = 32;

/// Generate a fresh random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Derive a fixed-size symmetric key from a password and salt.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key)
        .map_err(|e| VaultError::KeyDerivationError(format!("PBKDF2 failed: {e}")))?;
    Ok(key)
}
