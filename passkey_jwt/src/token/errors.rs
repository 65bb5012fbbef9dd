use thiserror::Error;

/// Errors that can occur during token issuance and verification.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token signature or structure is invalid
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// Error signing a new token
    #[error("Signing error: {0}")]
    Signing(String),
}
