use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::token::issue_token;
use crate::userdb::{User, UserError, UserSearchField, UserStore};

use super::errors::CoordinationError;

/// Register a password-keyed account and issue a token.
///
/// Unlike the passkey flow, registering an existing username is a hard
/// conflict rather than an upsert.
pub async fn register_password_user_core(
    username: &str,
    password: &str,
) -> Result<String, CoordinationError> {
    if username.is_empty() || password.is_empty() {
        return Err(
            CoordinationError::InvalidRequest("username and password are required".to_string())
                .log(),
        );
    }

    let password_hash = hash_password(password)?;

    let user = UserStore::create_user(User::new_with_username(
        username.to_string(),
        password_hash,
    ))
    .await
    .map_err(|e| match e {
        UserError::AlreadyExists(_) => {
            CoordinationError::Conflict(format!("Username {username} is taken")).log()
        }
        other => CoordinationError::from(other),
    })?;

    let token = issue_token(&user.id, username)?;
    tracing::info!(user_id = %user.id, "Password registration completed");

    Ok(token)
}

/// Verify a username/password pair and issue a token.
///
/// Unknown usernames and wrong passwords produce the same error so the
/// endpoint does not reveal which accounts exist.
pub async fn login_password_core(
    username: &str,
    password: &str,
) -> Result<String, CoordinationError> {
    let invalid =
        || CoordinationError::Authentication("Invalid username or password".to_string()).log();

    let user = UserStore::get_user_by(UserSearchField::Username(username.to_string()))
        .await?
        .ok_or_else(invalid)?;

    let stored_hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    verify_password(password, stored_hash).map_err(|_| invalid())?;

    let token = issue_token(&user.id, username)?;
    tracing::info!(user_id = %user.id, "Password login completed");

    Ok(token)
}

fn hash_password(password: &str) -> Result<String, CoordinationError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoordinationError::Coordination(format!("Password hashing failed: {e}")).log())
}

fn verify_password(password: &str, stored_hash: &str) -> Result<(), argon2::password_hash::Error> {
    let parsed = PasswordHash::new(stored_hash)?;
    Argon2::default().verify_password(password.as_bytes(), &parsed)
}
