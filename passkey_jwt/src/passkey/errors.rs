use thiserror::Error;

use crate::utils::UtilError;

/// Errors that can occur during WebAuthn/Passkey operations.
#[derive(Debug, Error)]
pub enum PasskeyError {
    /// Error during the registration ceremony
    #[error("Registration error: {0}")]
    Registration(String),

    /// Error during the authentication ceremony (e.g., invalid signature)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Error accessing or modifying stored passkey data
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error when a requested resource (e.g., credential) is not found
    #[error("Not found error: {0}")]
    NotFound(String),

    /// Error with improperly formatted data
    #[error("Invalid format: {0}")]
    Format(String),

    /// Error from utility operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),

    /// Error from JSON serialization/deserialization
    #[error("Serde error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PasskeyError::Authentication("bad signature".to_string());
        assert_eq!(error.to_string(), "Authentication error: bad signature");

        let error = PasskeyError::NotFound("Y3JlZC1pZA".to_string());
        assert_eq!(error.to_string(), "Not found error: Y3JlZC1pZA");
    }

    #[test]
    fn test_from_serde_json_error() {
        let serde_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();

        let error = PasskeyError::from(serde_error);

        assert!(matches!(error, PasskeyError::SerdeJson(_)));
    }

    #[test]
    fn test_from_util_error() {
        let util_error = UtilError::Format("bad base64url".to_string());

        let error = PasskeyError::from(util_error);

        assert!(matches!(error, PasskeyError::Utils(_)));
        assert!(error.to_string().contains("bad base64url"));
    }
}
