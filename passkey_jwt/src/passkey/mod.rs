mod config;
mod errors;
mod main;
mod storage;
mod types;

pub use errors::PasskeyError;
pub use storage::PasskeyStore;
pub use types::{CredentialSearchField, PasskeyCredential};

pub(crate) use main::{
    finish_authentication, finish_registration, start_authentication, start_registration,
};

/// Initialize the passkey credential tables
pub(crate) async fn init() -> Result<(), PasskeyError> {
    PasskeyStore::init().await?;
    Ok(())
}
