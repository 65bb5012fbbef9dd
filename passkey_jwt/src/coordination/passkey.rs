use webauthn_rs::prelude::{
    CreationChallengeResponse, PasskeyAuthentication, PasskeyRegistration, PublicKeyCredential,
    RegisterPublicKeyCredential, RequestChallengeResponse,
};

use crate::passkey::{
    CredentialSearchField, PasskeyStore, finish_authentication, finish_registration,
    start_authentication, start_registration,
};
use crate::token::issue_token;
use crate::utils::base64url_encode;
use crate::userdb::{User, UserSearchField, UserStore};

use super::errors::CoordinationError;

/// Start a passkey registration ceremony for an email address.
///
/// The account is created on first contact; registering the same email again
/// attaches the new passkey to the existing account. The ceremony state is
/// written to the user row and must survive until the verify call.
pub async fn handle_register_options_core(
    email: &str,
) -> Result<CreationChallengeResponse, CoordinationError> {
    if email.is_empty() {
        return Err(CoordinationError::InvalidRequest("email is required".to_string()).log());
    }

    let user = UserStore::upsert_user_by_email(User::new_with_email(email.to_string())).await?;

    let (challenge_response, reg_state) = start_registration(&user).await?;

    let state_json = serde_json::to_string(&reg_state)
        .map_err(|e| CoordinationError::Coordination(e.to_string()).log())?;
    UserStore::set_challenge(&user.id, Some(&state_json)).await?;

    Ok(challenge_response)
}

/// Verify an authenticator's registration response and issue a token.
///
/// The pending ceremony state is consumed only on success; a failed
/// verification leaves it in place so the client can retry the same ceremony.
pub async fn handle_register_verify_core(
    email: &str,
    response: &RegisterPublicKeyCredential,
) -> Result<String, CoordinationError> {
    let user = get_user_by_email(email).await?;

    let state_json = user
        .challenge
        .as_deref()
        .ok_or_else(|| challenge_not_found(email))?;
    let reg_state: PasskeyRegistration = serde_json::from_str(state_json).map_err(|e| {
        CoordinationError::Authentication(format!("Stale ceremony state: {e}")).log()
    })?;

    finish_registration(&user, &reg_state, response).await?;

    UserStore::set_challenge(&user.id, None).await?;

    let token = issue_token(&user.id, &user.account_label())?;
    tracing::info!(user_id = %user.id, "Passkey registration completed");

    Ok(token)
}

/// Start a passkey authentication ceremony for an email address.
///
/// The allow-list is built from the account's registered credentials; an
/// account with no passkeys cannot start the ceremony.
pub async fn handle_login_options_core(
    email: &str,
) -> Result<RequestChallengeResponse, CoordinationError> {
    let user = get_user_by_email(email).await?;

    let credentials =
        PasskeyStore::get_credentials_by(CredentialSearchField::UserId(user.id.clone())).await?;
    if credentials.is_empty() {
        return Err(CoordinationError::ResourceNotFound {
            resource_type: "credential".to_string(),
            resource_id: email.to_string(),
        }
        .log());
    }

    let (challenge_response, auth_state) = start_authentication(&credentials)?;

    let state_json = serde_json::to_string(&auth_state)
        .map_err(|e| CoordinationError::Coordination(e.to_string()).log())?;
    UserStore::set_challenge(&user.id, Some(&state_json)).await?;

    Ok(challenge_response)
}

/// Verify an authenticator's assertion and issue a token.
pub async fn handle_login_verify_core(
    email: &str,
    response: &PublicKeyCredential,
) -> Result<String, CoordinationError> {
    let user = get_user_by_email(email).await?;

    let state_json = user
        .challenge
        .as_deref()
        .ok_or_else(|| challenge_not_found(email))?;

    let credentials =
        PasskeyStore::get_credentials_by(CredentialSearchField::UserId(user.id.clone())).await?;

    // The asserted credential must be one we hold, checked before any
    // cryptographic verification
    let credential_id = base64url_encode(&response.raw_id);
    if !credentials.iter().any(|c| c.credential_id == credential_id) {
        return Err(CoordinationError::ResourceNotFound {
            resource_type: "credential".to_string(),
            resource_id: credential_id,
        }
        .log());
    }

    let auth_state: PasskeyAuthentication = serde_json::from_str(state_json).map_err(|e| {
        CoordinationError::Authentication(format!("Stale ceremony state: {e}")).log()
    })?;

    finish_authentication(&credentials, &auth_state, response).await?;

    UserStore::set_challenge(&user.id, None).await?;

    let token = issue_token(&user.id, &user.account_label())?;
    tracing::info!(user_id = %user.id, "Passkey authentication completed");

    Ok(token)
}

fn challenge_not_found(email: &str) -> CoordinationError {
    CoordinationError::ResourceNotFound {
        resource_type: "challenge".to_string(),
        resource_id: email.to_string(),
    }
    .log()
}

async fn get_user_by_email(email: &str) -> Result<User, CoordinationError> {
    UserStore::get_user_by(UserSearchField::Email(email.to_string()))
        .await?
        .ok_or_else(|| {
            CoordinationError::ResourceNotFound {
                resource_type: "user".to_string(),
                resource_id: email.to_string(),
            }
            .log()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passkey::PasskeyCredential;
    use crate::test_utils::init_test_environment;
    use chrono::Utc;
    use serial_test::serial;

    fn unique_email(suffix: &str) -> String {
        format!("flow-{suffix}-{}@example.com", Utc::now().timestamp_millis())
    }

    #[tokio::test]
    #[serial]
    async fn test_register_options_creates_user_and_challenge() {
        init_test_environment().await;

        let email = unique_email("opts");
        let response = handle_register_options_core(&email)
            .await
            .expect("Options should succeed");

        // Challenge payload is non-trivial
        let json = serde_json::to_value(&response).expect("Options should serialize");
        let challenge = json["publicKey"]["challenge"]
            .as_str()
            .expect("Challenge should be a string");
        assert!(!challenge.is_empty());

        let user = UserStore::get_user_by(UserSearchField::Email(email))
            .await
            .expect("Lookup should succeed")
            .expect("User should have been created");
        assert!(user.challenge.is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_register_options_rejects_empty_email() {
        init_test_environment().await;

        let result = handle_register_options_core("").await;
        assert!(matches!(result, Err(CoordinationError::InvalidRequest(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_register_options_repeated_reuses_account() {
        init_test_environment().await;

        let email = unique_email("repeat");
        handle_register_options_core(&email)
            .await
            .expect("First options should succeed");
        let first = UserStore::get_user_by(UserSearchField::Email(email.clone()))
            .await
            .unwrap()
            .unwrap();

        handle_register_options_core(&email)
            .await
            .expect("Second options should succeed");
        let second = UserStore::get_user_by(UserSearchField::Email(email))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    #[serial]
    async fn test_register_verify_without_ceremony() {
        init_test_environment().await;

        let email = unique_email("no-ceremony");
        UserStore::upsert_user_by_email(User::new_with_email(email.clone()))
            .await
            .expect("User insert should succeed");

        let response: RegisterPublicKeyCredential = serde_json::from_value(serde_json::json!({
            "id": "ZmFrZQ",
            "rawId": "ZmFrZQ",
            "type": "public-key",
            "response": {
                "attestationObject": "ZmFrZQ",
                "clientDataJSON": "ZmFrZQ"
            },
            "extensions": {}
        }))
        .expect("Credential JSON should parse");

        let result = handle_register_verify_core(&email, &response).await;
        assert!(matches!(
            result,
            Err(CoordinationError::ResourceNotFound { resource_type, .. }) if resource_type == "challenge"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_login_options_unknown_user() {
        init_test_environment().await;

        let result = handle_login_options_core("nobody@example.com").await;
        assert!(matches!(
            result,
            Err(CoordinationError::ResourceNotFound { resource_type, .. }) if resource_type == "user"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_login_options_user_without_credentials() {
        init_test_environment().await;

        let email = unique_email("no-creds");
        UserStore::upsert_user_by_email(User::new_with_email(email.clone()))
            .await
            .expect("User insert should succeed");

        let result = handle_login_options_core(&email).await;
        assert!(matches!(
            result,
            Err(CoordinationError::ResourceNotFound { resource_type, .. }) if resource_type == "credential"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_login_verify_unknown_credential_id() {
        init_test_environment().await;

        let email = unique_email("wrong-cred");
        let user = UserStore::upsert_user_by_email(User::new_with_email(email.clone()))
            .await
            .expect("User insert should succeed");
        UserStore::set_challenge(&user.id, Some("pending-ceremony"))
            .await
            .expect("Challenge update should succeed");

        let now = Utc::now();
        PasskeyStore::store_credential(PasskeyCredential {
            credential_id: "a25vd24taWQ".to_string(),
            user_id: user.id.clone(),
            public_key: "{}".to_string(),
            counter: 0,
            transports: None,
            created_at: now,
            updated_at: now,
            last_used_at: now,
        })
        .await
        .expect("Credential insert should succeed");

        // rawId "ZmFrZQ" does not match the stored credential
        let response: PublicKeyCredential = serde_json::from_value(serde_json::json!({
            "id": "ZmFrZQ",
            "rawId": "ZmFrZQ",
            "type": "public-key",
            "response": {
                "authenticatorData": "ZmFrZQ",
                "clientDataJSON": "ZmFrZQ",
                "signature": "ZmFrZQ"
            },
            "extensions": {}
        }))
        .expect("Credential JSON should parse");

        let result = handle_login_verify_core(&email, &response).await;
        assert!(matches!(
            result,
            Err(CoordinationError::ResourceNotFound { resource_type, .. }) if resource_type == "credential"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_login_verify_without_ceremony() {
        init_test_environment().await;

        let email = unique_email("login-raw");
        UserStore::upsert_user_by_email(User::new_with_email(email.clone()))
            .await
            .expect("User insert should succeed");

        let response: PublicKeyCredential = serde_json::from_value(serde_json::json!({
            "id": "ZmFrZQ",
            "rawId": "ZmFrZQ",
            "type": "public-key",
            "response": {
                "authenticatorData": "ZmFrZQ",
                "clientDataJSON": "ZmFrZQ",
                "signature": "ZmFrZQ"
            },
            "extensions": {}
        }))
        .expect("Credential JSON should parse");

        let result = handle_login_verify_core(&email, &response).await;
        assert!(matches!(
            result,
            Err(CoordinationError::ResourceNotFound { resource_type, .. }) if resource_type == "challenge"
        ));
    }
}
