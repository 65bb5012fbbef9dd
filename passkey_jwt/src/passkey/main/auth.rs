use chrono::Utc;
use webauthn_rs::prelude::{
    AuthenticationResult, Passkey, PasskeyAuthentication, PublicKeyCredential,
    RequestChallengeResponse,
};

use crate::utils::base64url_encode;

use crate::passkey::config::WEBAUTHN;
use crate::passkey::errors::PasskeyError;
use crate::passkey::storage::PasskeyStore;
use crate::passkey::types::PasskeyCredential;

/// Deserialize the stored passkeys for an allow-list.
pub(crate) fn passkeys_from_credentials(
    credentials: &[PasskeyCredential],
) -> Result<Vec<Passkey>, PasskeyError> {
    credentials
        .iter()
        .map(|c| serde_json::from_str(&c.public_key).map_err(PasskeyError::from))
        .collect()
}

/// Start an authentication ceremony against the given allow-list.
pub(crate) fn start_authentication(
    credentials: &[PasskeyCredential],
) -> Result<(RequestChallengeResponse, PasskeyAuthentication), PasskeyError> {
    let passkeys = passkeys_from_credentials(credentials)?;

    WEBAUTHN
        .start_passkey_authentication(&passkeys)
        .map_err(|e| PasskeyError::Authentication(e.to_string()))
}

/// Complete an authentication ceremony: verify the assertion, then persist
/// the updated signature counter on the matching credential.
pub(crate) async fn finish_authentication(
    credentials: &[PasskeyCredential],
    auth_state: &PasskeyAuthentication,
    response: &PublicKeyCredential,
) -> Result<AuthenticationResult, PasskeyError> {
    let auth_result = WEBAUTHN
        .finish_passkey_authentication(response, auth_state)
        .map_err(|e| PasskeyError::Authentication(e.to_string()))?;

    let credential_id = base64url_encode(auth_result.cred_id());
    let stored = credentials
        .iter()
        .find(|c| c.credential_id == credential_id)
        .ok_or_else(|| PasskeyError::NotFound(credential_id.clone()))?;

    let mut passkey: Passkey = serde_json::from_str(&stored.public_key)?;
    passkey.update_credential(&auth_result);
    let public_key = serde_json::to_string(&passkey)?;

    PasskeyStore::update_credential(
        &credential_id,
        &public_key,
        i64::from(auth_result.counter()),
        Utc::now(),
    )
    .await?;

    Ok(auth_result)
}
