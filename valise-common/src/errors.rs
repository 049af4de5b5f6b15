use thiserror::Error;

/// Error types shared across the Valise crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Decoding error: {0}")]
    DecodingError(String),
}
