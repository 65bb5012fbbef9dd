use axum::{
    Json,
    routing::{Router, post},
};
use serde::Deserialize;

use passkey_jwt::{login_password_core, register_password_user_core};

use crate::error::{ApiError, IntoResponseError};
use crate::passkey::TokenResponse;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[derive(Deserialize)]
pub(crate) struct PasswordRequest {
    pub username: String,
    pub password: String,
}

pub(crate) async fn register(
    Json(request): Json<PasswordRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = register_password_user_core(&request.username, &request.password)
        .await
        .into_response_error()?;

    Ok(Json(TokenResponse { token }))
}

pub(crate) async fn login(
    Json(request): Json<PasswordRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = login_password_core(&request.username, &request.password)
        .await
        .into_response_error()?;

    Ok(Json(TokenResponse { token }))
}
