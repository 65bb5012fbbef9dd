use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user account shared by the passkey ceremonies and the legacy password flow.
///
/// Passkey ceremonies key users by `email`; the password flow keys them by
/// `username`. Both columns are unique and nullable, so either flow can create
/// the account and the other can attach to it later.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Unique user identifier (UUID v4)
    pub id: String,
    /// Email address, unique when present; key for passkey ceremonies
    pub email: Option<String>,
    /// Login name for the password flow, unique when present
    pub username: Option<String>,
    /// Argon2id password hash, set only by the password flow
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// WebAuthn user handle (UUID v4), stable for the lifetime of the account
    pub user_handle: String,
    /// Serialized in-flight ceremony state; null outside a ceremony
    #[serde(skip_serializing, default)]
    pub challenge: Option<String>,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user keyed by email (passkey registration path)
    pub fn new_with_email(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email: Some(email),
            username: None,
            password_hash: None,
            user_handle: Uuid::new_v4().to_string(),
            challenge: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new user keyed by username (password registration path)
    pub fn new_with_username(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email: None,
            username: Some(username),
            password_hash: Some(password_hash),
            user_handle: Uuid::new_v4().to_string(),
            challenge: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Human-readable name for this account, whichever key it was created with
    pub fn account_label(&self) -> String {
        self.email
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Search field options for user lookup
#[derive(Debug, Clone)]
pub enum UserSearchField {
    Id(String),
    Email(String),
    Username(String),
}

impl std::fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "id={id}"),
            UserSearchField::Email(email) => write!(f, "email={email}"),
            UserSearchField::Username(username) => write!(f, "username={username}"),
        }
    }
}
