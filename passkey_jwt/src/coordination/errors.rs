//! Error types for the coordination layer

use thiserror::Error;

use crate::items::ItemError;
use crate::passkey::PasskeyError;
use crate::token::TokenError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors that can occur while coordinating the authentication flows and
/// item operations
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// General coordination error
    #[error("Coordination error: {0}")]
    Coordination(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Authentication failure, deliberately vague toward the caller
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Unauthorized access error
    #[error("Unauthorized access")]
    Unauthorized,

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid request payload
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),

    /// Error from Passkey operations
    #[error("Passkey error: {0}")]
    PasskeyError(PasskeyError),

    /// Error from token operations
    #[error("Token error: {0}")]
    TokenError(TokenError),

    /// Error from item operations
    #[error("Item error: {0}")]
    ItemError(ItemError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

impl CoordinationError {
    /// Log the error and return self
    ///
    /// Logs the error with appropriate context and returns self, allowing for
    /// method chaining and explicit logging when needed.
    pub fn log(self) -> Self {
        match &self {
            Self::Coordination(msg) => tracing::error!("Coordination error: {}", msg),
            Self::Database(msg) => tracing::error!("Database error: {}", msg),
            Self::Authentication(msg) => tracing::error!("Authentication error: {}", msg),
            Self::Unauthorized => tracing::error!("Unauthorized access"),
            Self::Conflict(message) => tracing::error!("Conflict: {}", message),
            Self::InvalidRequest(message) => tracing::error!("Invalid request: {}", message),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::error!("Resource not found: {} {}", resource_type, resource_id),
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::PasskeyError(err) => tracing::error!("Passkey error: {}", err),
            Self::TokenError(err) => tracing::error!("Token error: {}", err),
            Self::ItemError(err) => tracing::error!("Item error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<PasskeyError> for CoordinationError {
    fn from(err: PasskeyError) -> Self {
        let error = Self::PasskeyError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::UserError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<TokenError> for CoordinationError {
    fn from(err: TokenError) -> Self {
        let error = Self::TokenError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<ItemError> for CoordinationError {
    fn from(err: ItemError) -> Self {
        let error = Self::ItemError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        let error = Self::UtilsError(err);
        tracing::error!("{}", error);
        error
    }
}
