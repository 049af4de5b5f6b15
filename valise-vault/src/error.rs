use thiserror::Error;

/// Error types for the valise-vault crate
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Key derivation error: {0}")]
    KeyDerivationError(String),

    #[error("Encryption error: {0}")]
    EncryptionError(String),

    #[error("Decryption error: {0}")]
    DecryptionError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for valise-vault operations
pub type Result<T> = std::result::Result<T, VaultError>;
