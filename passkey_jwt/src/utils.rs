use base64::engine::{Engine, general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UtilError {
    #[error("Invalid format: {0}")]
    Format(String),
}

/// Encode bytes as base64url without padding, the WebAuthn wire encoding
/// for credential IDs.
pub(crate) fn base64url_encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

pub(crate) fn base64url_decode(input: &str) -> Result<Vec<u8>, UtilError> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| UtilError::Format(format!("Invalid base64url: {e}")))
}
