use axum::{
    Router,
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{items, passkey, password};

/// Build the full API router.
///
/// Routes:
/// - `GET  /ping` liveness probe
/// - `POST /register/options`, `POST /register/verify` passkey registration
/// - `POST /login/options`, `POST /login/verify` passkey authentication
/// - `POST /auth/register`, `POST /auth/login` password flow
/// - `GET/POST /items`, `GET/PUT/DELETE /items/{item_id}` bearer-protected CRUD
pub fn router() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .nest("/register", passkey::router_register())
        .nest("/login", passkey::router_login())
        .nest("/auth", password::router())
        .nest("/items", items::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn ping() -> &'static str {
    "PONG"
}
