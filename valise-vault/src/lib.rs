//! Valise Vault – encrypted in-memory buffers.
//!
//! A [`SecureBuffer`] holds bytes in memory behind two independently
//! positioned views (raw binary and UTF-8 text) and can produce an
//! encrypted copy of its content with either an explicit symmetric key or
//! a key derived from a password. The derivation salt travels in the
//! encrypted stream itself, so decryption needs no external metadata.

pub mod buffer;
pub mod cipher;
pub mod derivation;
pub mod error;

pub use buffer::{BinaryView, EncryptedStream, SecureBuffer, TextView};
pub use cipher::{open, seal, NONCE_LEN};
pub use derivation::{derive_key, generate_salt, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
pub use error::{Result, VaultError};
