use sqlx::{Pool, Postgres};

use crate::storage::validate_postgres_table_schema;
use crate::userdb::DB_TABLE_USERS;

use crate::items::errors::ItemError;
use crate::items::types::Item;

use super::config::DB_TABLE_ITEMS;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), ItemError> {
    let items_table = DB_TABLE_ITEMS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES {}(id),
            name TEXT NOT NULL,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        items_table, users_table
    ))
    .execute(pool)
    .await
    .map_err(|e| ItemError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        r#"
        CREATE INDEX IF NOT EXISTS idx_{}_user_id ON {}(user_id)
        "#,
        items_table.replace(".", "_"),
        items_table
    ))
    .execute(pool)
    .await
    .map_err(|e| ItemError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn validate_item_tables_postgres(pool: &Pool<Postgres>) -> Result<(), ItemError> {
    let items_table = DB_TABLE_ITEMS.as_str();

    let expected_columns = vec![
        ("id", "text"),
        ("user_id", "text"),
        ("name", "text"),
        ("description", "text"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, items_table, &expected_columns, ItemError::Storage).await
}

pub(super) async fn insert_item_postgres(
    pool: &Pool<Postgres>,
    item: &Item,
) -> Result<(), ItemError> {
    let items_table = DB_TABLE_ITEMS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {} (id, user_id, name, description, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
        items_table
    ))
    .bind(&item.id)
    .bind(&item.user_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(pool)
    .await
    .map_err(|e| ItemError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_item_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    item_id: &str,
) -> Result<Option<Item>, ItemError> {
    let items_table = DB_TABLE_ITEMS.as_str();

    sqlx::query_as::<_, Item>(&format!(
        r#"SELECT * FROM {} WHERE id = $1 AND user_id = $2"#,
        items_table
    ))
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| ItemError::Storage(e.to_string()))
}

pub(super) async fn list_items_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Vec<Item>, ItemError> {
    let items_table = DB_TABLE_ITEMS.as_str();

    sqlx::query_as::<_, Item>(&format!(
        r#"SELECT * FROM {} WHERE user_id = $1 ORDER BY created_at"#,
        items_table
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| ItemError::Storage(e.to_string()))
}

pub(super) async fn update_item_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    item_id: &str,
    name: &str,
    description: Option<&str>,
) -> Result<(), ItemError> {
    let items_table = DB_TABLE_ITEMS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {}
        SET name = $1, description = $2, updated_at = CURRENT_TIMESTAMP
        WHERE id = $3 AND user_id = $4
        "#,
        items_table
    ))
    .bind(name)
    .bind(description)
    .bind(item_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| ItemError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ItemError::NotFound);
    }

    Ok(())
}

pub(super) async fn delete_item_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    item_id: &str,
) -> Result<(), ItemError> {
    let items_table = DB_TABLE_ITEMS.as_str();

    let result = sqlx::query(&format!(
        r#"DELETE FROM {} WHERE id = $1 AND user_id = $2"#,
        items_table
    ))
    .bind(item_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| ItemError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ItemError::NotFound);
    }

    Ok(())
}
