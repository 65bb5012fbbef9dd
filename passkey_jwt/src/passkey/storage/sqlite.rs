use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::userdb::DB_TABLE_USERS;

use crate::passkey::errors::PasskeyError;
use crate::passkey::types::{CredentialSearchField, PasskeyCredential};

use super::config::DB_TABLE_PASSKEY_CREDENTIALS;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), PasskeyError> {
    let passkey_table = DB_TABLE_PASSKEY_CREDENTIALS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            credential_id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES {}(id),
            public_key TEXT NOT NULL,
            counter INTEGER NOT NULL DEFAULT 0,
            transports TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            last_used_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        passkey_table, users_table
    ))
    .execute(pool)
    .await
    .map_err(|e| PasskeyError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        r#"
        CREATE INDEX IF NOT EXISTS idx_{}_user_id ON {}(user_id)
        "#,
        passkey_table.replace(".", "_"),
        passkey_table
    ))
    .execute(pool)
    .await
    .map_err(|e| PasskeyError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the passkey credential table schema matches what we expect
pub(super) async fn validate_passkey_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), PasskeyError> {
    let passkey_table = DB_TABLE_PASSKEY_CREDENTIALS.as_str();

    let expected_columns = vec![
        ("credential_id", "TEXT"),
        ("user_id", "TEXT"),
        ("public_key", "TEXT"),
        ("counter", "INTEGER"),
        ("transports", "TEXT"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
        ("last_used_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(
        pool,
        passkey_table,
        &expected_columns,
        PasskeyError::Storage,
    )
    .await
}

pub(super) async fn store_credential_sqlite(
    pool: &Pool<Sqlite>,
    credential: &PasskeyCredential,
) -> Result<(), PasskeyError> {
    create_tables_sqlite(pool).await?;

    let passkey_table = DB_TABLE_PASSKEY_CREDENTIALS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT OR REPLACE INTO {}
        (credential_id, user_id, public_key, counter, transports, created_at, updated_at, last_used_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        passkey_table
    ))
    .bind(&credential.credential_id)
    .bind(&credential.user_id)
    .bind(&credential.public_key)
    .bind(credential.counter)
    .bind(&credential.transports)
    .bind(credential.created_at)
    .bind(credential.updated_at)
    .bind(credential.last_used_at)
    .execute(pool)
    .await
    .map_err(|e| PasskeyError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_credential_sqlite(
    pool: &Pool<Sqlite>,
    credential_id: &str,
) -> Result<Option<PasskeyCredential>, PasskeyError> {
    create_tables_sqlite(pool).await?;

    let passkey_table = DB_TABLE_PASSKEY_CREDENTIALS.as_str();

    sqlx::query_as::<_, PasskeyCredential>(&format!(
        r#"SELECT * FROM {} WHERE credential_id = ?"#,
        passkey_table
    ))
    .bind(credential_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| PasskeyError::Storage(e.to_string()))
}

pub(super) async fn get_credentials_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &CredentialSearchField,
) -> Result<Vec<PasskeyCredential>, PasskeyError> {
    create_tables_sqlite(pool).await?;

    let passkey_table = DB_TABLE_PASSKEY_CREDENTIALS.as_str();
    let query = match field {
        CredentialSearchField::CredentialId(_) => {
            format!(r#"SELECT * FROM {} WHERE credential_id = ?"#, passkey_table)
        }
        CredentialSearchField::UserId(_) => {
            format!(r#"SELECT * FROM {} WHERE user_id = ?"#, passkey_table)
        }
    };

    sqlx::query_as::<_, PasskeyCredential>(&query)
        .bind(field.as_str())
        .fetch_all(pool)
        .await
        .map_err(|e| PasskeyError::Storage(e.to_string()))
}

pub(super) async fn update_credential_sqlite(
    pool: &Pool<Sqlite>,
    credential_id: &str,
    public_key: &str,
    counter: i64,
    last_used_at: DateTime<Utc>,
) -> Result<(), PasskeyError> {
    create_tables_sqlite(pool).await?;

    let passkey_table = DB_TABLE_PASSKEY_CREDENTIALS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {}
        SET public_key = ?, counter = ?, last_used_at = ?, updated_at = CURRENT_TIMESTAMP
        WHERE credential_id = ?
        "#,
        passkey_table
    ))
    .bind(public_key)
    .bind(counter)
    .bind(last_used_at)
    .bind(credential_id)
    .execute(pool)
    .await
    .map_err(|e| PasskeyError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(PasskeyError::NotFound(format!(
            "credential {credential_id}"
        )));
    }

    Ok(())
}

pub(super) async fn delete_credential_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &CredentialSearchField,
) -> Result<(), PasskeyError> {
    create_tables_sqlite(pool).await?;

    let passkey_table = DB_TABLE_PASSKEY_CREDENTIALS.as_str();
    let query = match field {
        CredentialSearchField::CredentialId(_) => {
            format!(r#"DELETE FROM {} WHERE credential_id = ?"#, passkey_table)
        }
        CredentialSearchField::UserId(_) => {
            format!(r#"DELETE FROM {} WHERE user_id = ?"#, passkey_table)
        }
    };

    sqlx::query(&query)
        .bind(field.as_str())
        .execute(pool)
        .await
        .map_err(|e| PasskeyError::Storage(e.to_string()))?;

    Ok(())
}
