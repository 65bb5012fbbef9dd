mod errors;
mod storage;
mod types;

pub use errors::ItemError;
pub use storage::ItemStore;
pub use types::Item;

/// Initialize the items table
pub(crate) async fn init() -> Result<(), ItemError> {
    ItemStore::init().await?;
    Ok(())
}
