use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored credential information for a WebAuthn/Passkey.
///
/// The `public_key` column holds the serialized `webauthn_rs` passkey, which
/// carries the COSE public key together with the verification metadata the
/// library needs for subsequent authentications. The `counter` column mirrors
/// the library's signature counter so replay detection survives restarts.
#[derive(Clone, Serialize, Deserialize, Debug, FromRow)]
pub struct PasskeyCredential {
    /// Base64url-encoded (no padding) credential ID
    pub credential_id: String,
    /// User ID associated with this credential (database ID)
    pub user_id: String,
    /// Serialized passkey, including the public key
    pub public_key: String,
    /// Signature counter; monotonically non-decreasing
    pub counter: i64,
    /// Transports reported by the client at registration (JSON array)
    pub transports: Option<String>,
    /// When the credential was created
    pub created_at: DateTime<Utc>,
    /// When the credential was last updated
    pub updated_at: DateTime<Utc>,
    /// When the credential was last used
    pub last_used_at: DateTime<Utc>,
}

/// Search field options for credential lookup
#[derive(Debug, Clone)]
pub enum CredentialSearchField {
    /// Search by base64url credential ID
    CredentialId(String),
    /// Search by owning user's database ID
    UserId(String),
}

impl CredentialSearchField {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            CredentialSearchField::CredentialId(id) => id.as_str(),
            CredentialSearchField::UserId(id) => id.as_str(),
        }
    }
}
