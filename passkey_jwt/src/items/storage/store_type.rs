use crate::storage::GENERIC_DATA_STORE;

use crate::items::errors::ItemError;
use crate::items::types::Item;

use super::postgres::*;
use super::sqlite::*;

/// Owner-scoped item persistence. Every operation takes the owner's user ID
/// and the queries themselves enforce the scoping, so an item belonging to
/// another user is indistinguishable from one that does not exist.
pub struct ItemStore;

impl ItemStore {
    /// Initialize the items table
    pub(crate) async fn init() -> Result<(), ItemError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_item_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_item_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(ItemError::Storage("Unsupported database type".to_string())),
        }
    }

    #[tracing::instrument(skip(item), fields(item_id = %item.id, user_id = %item.user_id))]
    pub async fn create_item(item: Item) -> Result<Item, ItemError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            insert_item_sqlite(pool, &item).await
        } else if let Some(pool) = store.as_postgres() {
            insert_item_postgres(pool, &item).await
        } else {
            Err(ItemError::Storage("Unsupported database type".to_string()))
        };

        match result {
            Ok(()) => {
                tracing::info!("Item created");
                Ok(item)
            }
            Err(e) => {
                tracing::error!(error = %e, "Item create failed");
                Err(e)
            }
        }
    }

    #[tracing::instrument(fields(user_id = %user_id, item_id = %item_id))]
    pub async fn get_item(user_id: &str, item_id: &str) -> Result<Option<Item>, ItemError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_item_sqlite(pool, user_id, item_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_item_postgres(pool, user_id, item_id).await
        } else {
            Err(ItemError::Storage("Unsupported database type".to_string()))
        }
    }

    /// List all items owned by the user, oldest first
    #[tracing::instrument(fields(user_id = %user_id))]
    pub async fn list_items(user_id: &str) -> Result<Vec<Item>, ItemError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            list_items_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            list_items_postgres(pool, user_id).await
        } else {
            Err(ItemError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Item list completed");
            }
            Err(e) => {
                tracing::error!(error = %e, "Item list failed");
            }
        }

        result
    }

    #[tracing::instrument(fields(user_id = %user_id, item_id = %item_id))]
    pub async fn update_item(
        user_id: &str,
        item_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), ItemError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            update_item_sqlite(pool, user_id, item_id, name, description).await
        } else if let Some(pool) = store.as_postgres() {
            update_item_postgres(pool, user_id, item_id, name, description).await
        } else {
            Err(ItemError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument(fields(user_id = %user_id, item_id = %item_id))]
    pub async fn delete_item(user_id: &str, item_id: &str) -> Result<(), ItemError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_item_sqlite(pool, user_id, item_id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_item_postgres(pool, user_id, item_id).await
        } else {
            Err(ItemError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use crate::userdb::{User, UserStore};
    use chrono::Utc;
    use serial_test::serial;

    async fn insert_test_user(suffix: &str) -> User {
        let timestamp = Utc::now().timestamp_millis();
        let email = format!("item-{suffix}-{timestamp}@example.com");
        UserStore::upsert_user_by_email(User::new_with_email(email))
            .await
            .expect("User insert should succeed")
    }

    #[tokio::test]
    #[serial]
    async fn test_create_and_get_item() {
        init_test_environment().await;

        let user = insert_test_user("create").await;
        let item = ItemStore::create_item(Item::new(&user.id, "notebook".to_string(), None))
            .await
            .expect("Create should succeed");

        let found = ItemStore::get_item(&user.id, &item.id)
            .await
            .expect("Lookup should succeed")
            .expect("Item should exist");

        assert_eq!(found.id, item.id);
        assert_eq!(found.name, "notebook");
        assert_eq!(found.description, None);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_items_scoped_to_owner() {
        init_test_environment().await;

        let alice = insert_test_user("alice").await;
        let bob = insert_test_user("bob").await;

        ItemStore::create_item(Item::new(&alice.id, "a-1".to_string(), None))
            .await
            .expect("Create should succeed");
        ItemStore::create_item(Item::new(&alice.id, "a-2".to_string(), None))
            .await
            .expect("Create should succeed");
        ItemStore::create_item(Item::new(&bob.id, "b-1".to_string(), None))
            .await
            .expect("Create should succeed");

        let items = ItemStore::list_items(&alice.id)
            .await
            .expect("List should succeed");

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.user_id == alice.id));
    }

    #[tokio::test]
    #[serial]
    async fn test_get_item_owned_by_another_user() {
        init_test_environment().await;

        let alice = insert_test_user("owner").await;
        let bob = insert_test_user("other").await;

        let item = ItemStore::create_item(Item::new(&alice.id, "private".to_string(), None))
            .await
            .expect("Create should succeed");

        // Bob cannot see Alice's item even with a valid ID
        let found = ItemStore::get_item(&bob.id, &item.id)
            .await
            .expect("Lookup should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_update_item() {
        init_test_environment().await;

        let user = insert_test_user("update").await;
        let item = ItemStore::create_item(Item::new(&user.id, "draft".to_string(), None))
            .await
            .expect("Create should succeed");

        ItemStore::update_item(&user.id, &item.id, "final", Some("reviewed"))
            .await
            .expect("Update should succeed");

        let found = ItemStore::get_item(&user.id, &item.id)
            .await
            .expect("Lookup should succeed")
            .expect("Item should exist");
        assert_eq!(found.name, "final");
        assert_eq!(found.description.as_deref(), Some("reviewed"));
    }

    #[tokio::test]
    #[serial]
    async fn test_update_item_owned_by_another_user() {
        init_test_environment().await;

        let alice = insert_test_user("upd-owner").await;
        let bob = insert_test_user("upd-other").await;

        let item = ItemStore::create_item(Item::new(&alice.id, "mine".to_string(), None))
            .await
            .expect("Create should succeed");

        let result = ItemStore::update_item(&bob.id, &item.id, "stolen", None).await;
        assert!(matches!(result, Err(ItemError::NotFound)));

        // Unchanged for the owner
        let found = ItemStore::get_item(&alice.id, &item.id)
            .await
            .expect("Lookup should succeed")
            .expect("Item should exist");
        assert_eq!(found.name, "mine");
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_item() {
        init_test_environment().await;

        let user = insert_test_user("delete").await;
        let item = ItemStore::create_item(Item::new(&user.id, "ephemeral".to_string(), None))
            .await
            .expect("Create should succeed");

        ItemStore::delete_item(&user.id, &item.id)
            .await
            .expect("Delete should succeed");

        let found = ItemStore::get_item(&user.id, &item.id)
            .await
            .expect("Lookup should succeed");
        assert!(found.is_none());

        // Deleting again reports not found
        let result = ItemStore::delete_item(&user.id, &item.id).await;
        assert!(matches!(result, Err(ItemError::NotFound)));
    }
}
