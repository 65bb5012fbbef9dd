use thiserror::Error;

/// Errors that can occur during item operations.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The item does not exist or belongs to another user
    #[error("Item not found")]
    NotFound,

    /// Error accessing or modifying stored item data
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid item data
    #[error("Invalid item data: {0}")]
    InvalidData(String),
}
