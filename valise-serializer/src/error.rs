use thiserror::Error;

/// Error types for the valise-serializer crate
#[derive(Error, Debug)]
pub enum SerialError {
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

/// Result type for valise-serializer operations
pub type Result<T> = std::result::Result<T, SerialError>;
