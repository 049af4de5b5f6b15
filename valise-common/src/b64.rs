//! Base64 transform shared by the tagged wire format and the vault.
//!
//! Uses the URL-safe alphabet with padding, the same form the vault accepts
//! for encoded symmetric keys.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

use crate::errors::CommonError;

/// Encode bytes as URL-safe base64 text.
pub fn encode(data: &[u8]) -> String {
    URL_SAFE.encode(data)
}

/// Decode URL-safe base64 text back into bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, CommonError> {
    URL_SAFE
        .decode(text.as_bytes())
        .map_err(|e| CommonError::DecodingError(format!("invalid base64 input: {e}")))
}
