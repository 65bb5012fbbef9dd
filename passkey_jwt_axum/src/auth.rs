use axum::{RequestPartsExt, extract::FromRequestParts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use http::{StatusCode, request::Parts};

use passkey_jwt::{User, user_from_token};

use crate::error::{ApiError, api_error};

/// Authenticated user information, available as an Axum extractor.
///
/// Extraction reads the `Authorization: Bearer` header, verifies the token
/// signature, and loads the account it was issued for. Handlers taking this
/// extractor reject unauthenticated requests with 401 before running.
///
/// # Example
///
/// ```no_run
/// use axum::{Router, routing::get};
/// use passkey_jwt_axum::AuthUser;
///
/// async fn protected_handler(user: AuthUser) -> String {
///     format!("Hello, {}!", user.account_label())
/// }
///
/// let app: Router = Router::new().route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl std::ops::Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| api_error(StatusCode::UNAUTHORIZED, "Missing bearer token"))?;

        let user = user_from_token(bearer.token())
            .await
            .map_err(|_| api_error(StatusCode::UNAUTHORIZED, "Unauthorized"))?;

        Ok(AuthUser(user))
    }
}
