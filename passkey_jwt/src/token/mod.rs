mod config;
mod errors;
mod jwt;

pub use errors::TokenError;
pub use jwt::{TokenClaims, issue_token, verify_token};
