use axum::{
    Json,
    routing::{Router, post},
};
use serde::{Deserialize, Serialize};
use webauthn_rs::prelude::{
    CreationChallengeResponse, PublicKeyCredential, RegisterPublicKeyCredential,
    RequestChallengeResponse,
};

use passkey_jwt::{
    handle_login_options_core, handle_login_verify_core, handle_register_options_core,
    handle_register_verify_core,
};

use crate::error::{ApiError, IntoResponseError};

pub fn router_register() -> Router {
    Router::new()
        .route("/options", post(register_options))
        .route("/verify", post(register_verify))
}

pub fn router_login() -> Router {
    Router::new()
        .route("/options", post(login_options))
        .route("/verify", post(login_verify))
}

#[derive(Deserialize)]
pub(crate) struct CeremonyStartRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub(crate) struct RegisterVerifyRequest {
    pub email: String,
    pub response: RegisterPublicKeyCredential,
}

#[derive(Deserialize)]
pub(crate) struct LoginVerifyRequest {
    pub email: String,
    pub response: PublicKeyCredential,
}

#[derive(Serialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// Successful ceremony verification: `verified` is always true here, failed
/// verifications surface as error responses instead.
#[derive(Serialize)]
pub(crate) struct VerifiedResponse {
    pub verified: bool,
    pub token: String,
}

pub(crate) async fn register_options(
    Json(request): Json<CeremonyStartRequest>,
) -> Result<Json<CreationChallengeResponse>, ApiError> {
    let options = handle_register_options_core(&request.email)
        .await
        .into_response_error()?;

    Ok(Json(options))
}

pub(crate) async fn register_verify(
    Json(request): Json<RegisterVerifyRequest>,
) -> Result<Json<VerifiedResponse>, ApiError> {
    let token = handle_register_verify_core(&request.email, &request.response)
        .await
        .into_response_error()?;

    Ok(Json(VerifiedResponse {
        verified: true,
        token,
    }))
}

pub(crate) async fn login_options(
    Json(request): Json<CeremonyStartRequest>,
) -> Result<Json<RequestChallengeResponse>, ApiError> {
    let options = handle_login_options_core(&request.email)
        .await
        .into_response_error()?;

    Ok(Json(options))
}

pub(crate) async fn login_verify(
    Json(request): Json<LoginVerifyRequest>,
) -> Result<Json<VerifiedResponse>, ApiError> {
    let token = handle_login_verify_core(&request.email, &request.response)
        .await
        .into_response_error()?;

    Ok(Json(VerifiedResponse {
        verified: true,
        token,
    }))
}
