//! passkey_jwt - Passkey and password authentication with bearer-token CRUD
//!
//! This crate coordinates WebAuthn passkey ceremonies, a legacy
//! username/password flow, JWT issuance, and owner-scoped item storage over
//! a shared relational store.

mod coordination;
mod items;
mod passkey;
mod storage;
mod token;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

// Re-export the main coordination components
pub use coordination::{
    CoordinationError, handle_login_options_core, handle_login_verify_core,
    handle_register_options_core, handle_register_verify_core, user_from_token,
};

pub use coordination::{login_password_core, register_password_user_core};

pub use coordination::{
    create_item_core, delete_item_core, get_item_core, list_items_core, update_item_core,
};

pub use items::{Item, ItemError};
pub use passkey::{PasskeyCredential, PasskeyError};
pub use token::{TokenClaims, TokenError, issue_token, verify_token};
pub use userdb::{User, UserError};

/// Initialize the storage layer and all tables
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    passkey::init().await?;
    items::init().await?;
    Ok(())
}
