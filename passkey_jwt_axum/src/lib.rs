//! passkey_jwt_axum - Axum handlers and routers for the passkey-jwt library
//!
//! Exposes the passkey ceremonies, the password flow, and the item CRUD as an
//! Axum router, with a bearer-token extractor for protected handlers.

mod auth;
mod error;
mod items;
mod passkey;
mod password;
mod router;

pub use auth::AuthUser;
pub use router::router;

// Re-export commonly used core items so binaries only need this crate
pub use passkey_jwt::init;
