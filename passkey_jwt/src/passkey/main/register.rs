use uuid::Uuid;
use webauthn_rs::prelude::{
    CreationChallengeResponse, CredentialID, Passkey, PasskeyRegistration,
    RegisterPublicKeyCredential,
};

use chrono::Utc;

use crate::userdb::User;
use crate::utils::{base64url_decode, base64url_encode};

use crate::passkey::config::WEBAUTHN;
use crate::passkey::errors::PasskeyError;
use crate::passkey::storage::PasskeyStore;
use crate::passkey::types::{CredentialSearchField, PasskeyCredential};

/// Start a registration ceremony for the given user.
///
/// Credentials the user already registered are passed as an exclude list so
/// authenticators refuse to create a duplicate. The returned registration
/// state must be persisted and presented again at verification.
pub(crate) async fn start_registration(
    user: &User,
) -> Result<(CreationChallengeResponse, PasskeyRegistration), PasskeyError> {
    let user_handle = Uuid::parse_str(&user.user_handle)
        .map_err(|e| PasskeyError::Format(format!("Invalid user handle: {e}")))?;

    let existing = PasskeyStore::get_credentials_by(CredentialSearchField::UserId(user.id.clone()))
        .await?;
    let exclude: Option<Vec<CredentialID>> = if existing.is_empty() {
        None
    } else {
        let ids = existing
            .iter()
            .map(|c| Ok(CredentialID::from(base64url_decode(&c.credential_id)?)))
            .collect::<Result<Vec<_>, PasskeyError>>()?;
        Some(ids)
    };

    let label = user.account_label();

    WEBAUTHN
        .start_passkey_registration(user_handle, &label, &label, exclude)
        .map_err(|e| PasskeyError::Registration(e.to_string()))
}

/// Complete a registration ceremony and persist the resulting credential.
pub(crate) async fn finish_registration(
    user: &User,
    reg_state: &PasskeyRegistration,
    response: &RegisterPublicKeyCredential,
) -> Result<PasskeyCredential, PasskeyError> {
    let passkey: Passkey = WEBAUTHN
        .finish_passkey_registration(response, reg_state)
        .map_err(|e| PasskeyError::Registration(e.to_string()))?;

    let credential = credential_from_passkey(&user.id, &passkey, response)?;
    PasskeyStore::store_credential(credential.clone()).await?;

    Ok(credential)
}

fn credential_from_passkey(
    user_id: &str,
    passkey: &Passkey,
    response: &RegisterPublicKeyCredential,
) -> Result<PasskeyCredential, PasskeyError> {
    let credential_id = base64url_encode(passkey.cred_id());

    // Keep the serialized passkey whole; it carries everything the library
    // needs for later authentications.
    let public_key = serde_json::to_string(passkey)?;

    let transports = response
        .response
        .transports
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    let now = Utc::now();
    Ok(PasskeyCredential {
        credential_id,
        user_id: user_id.to_string(),
        public_key,
        counter: 0,
        transports,
        created_at: now,
        updated_at: now,
        last_used_at: now,
    })
}
