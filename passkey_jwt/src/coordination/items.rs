use crate::items::{Item, ItemError, ItemStore};

use super::errors::CoordinationError;

fn item_not_found(item_id: &str) -> CoordinationError {
    CoordinationError::ResourceNotFound {
        resource_type: "item".to_string(),
        resource_id: item_id.to_string(),
    }
    .log()
}

/// Create an item owned by the given user.
pub async fn create_item_core(
    user_id: &str,
    name: &str,
    description: Option<&str>,
) -> Result<Item, CoordinationError> {
    if name.is_empty() {
        return Err(CoordinationError::InvalidRequest("name is required".to_string()).log());
    }

    let item = ItemStore::create_item(Item::new(
        user_id,
        name.to_string(),
        description.map(|d| d.to_string()),
    ))
    .await?;

    Ok(item)
}

/// List the user's items, oldest first.
pub async fn list_items_core(user_id: &str) -> Result<Vec<Item>, CoordinationError> {
    Ok(ItemStore::list_items(user_id).await?)
}

/// Fetch a single item. Items owned by other users report not-found.
pub async fn get_item_core(user_id: &str, item_id: &str) -> Result<Item, CoordinationError> {
    ItemStore::get_item(user_id, item_id)
        .await?
        .ok_or_else(|| item_not_found(item_id))
}

/// Update an item's name and description, returning the updated record.
pub async fn update_item_core(
    user_id: &str,
    item_id: &str,
    name: &str,
    description: Option<&str>,
) -> Result<Item, CoordinationError> {
    if name.is_empty() {
        return Err(CoordinationError::InvalidRequest("name is required".to_string()).log());
    }

    ItemStore::update_item(user_id, item_id, name, description)
        .await
        .map_err(|e| match e {
            ItemError::NotFound => item_not_found(item_id),
            other => CoordinationError::from(other),
        })?;

    get_item_core(user_id, item_id).await
}

/// Delete an item.
pub async fn delete_item_core(user_id: &str, item_id: &str) -> Result<(), CoordinationError> {
    ItemStore::delete_item(user_id, item_id)
        .await
        .map_err(|e| match e {
            ItemError::NotFound => item_not_found(item_id),
            other => CoordinationError::from(other),
        })
}
