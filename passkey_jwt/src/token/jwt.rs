use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::config::JWT_SECRET;
use super::errors::TokenError;

/// Claims carried by an access token.
///
/// Tokens never expire; `iat` is recorded for auditability only. Revocation
/// is out of scope, so possession of a token is possession of the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// The user's database ID
    pub user_id: String,
    /// The account label the token was issued for (email or username)
    pub account: String,
    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,
}

/// Sign a new HS256 access token for the given user.
pub fn issue_token(user_id: &str, account: &str) -> Result<String, TokenError> {
    let claims = TokenClaims {
        user_id: user_id.to_string(),
        account: account.to_string(),
        iat: Utc::now().timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify a token's signature and return its claims.
pub fn verify_token(token: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Tokens carry no exp claim
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| TokenError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_issue_and_verify_roundtrip() {
        init_test_environment().await;

        let token = issue_token("user-1", "alice@example.com").expect("Signing should succeed");
        let claims = verify_token(&token).expect("Verification should succeed");

        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.account, "alice@example.com");
        assert!(claims.iat > 0);
    }

    #[tokio::test]
    #[serial]
    async fn test_tampered_token_rejected() {
        init_test_environment().await;

        let token = issue_token("user-1", "alice@example.com").expect("Signing should succeed");

        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(verify_token(&tampered), Err(TokenError::Invalid(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_garbage_token_rejected() {
        init_test_environment().await;

        assert!(verify_token("not-a-jwt").is_err());
        assert!(verify_token("").is_err());
        assert!(verify_token("a.b.c").is_err());
    }

    #[tokio::test]
    #[serial]
    async fn test_token_remains_valid_over_time() {
        init_test_environment().await;

        // No exp claim: a token issued in the distant past still verifies
        let claims = TokenClaims {
            user_id: "user-1".to_string(),
            account: "alice@example.com".to_string(),
            iat: 0,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(std::env::var("JWT_SECRET").unwrap().as_bytes()),
        )
        .unwrap();

        let verified = verify_token(&token).expect("Old token should still verify");
        assert_eq!(verified, claims);
    }
}
