use sqlx::{Pool, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::config::DB_TABLE_USERS;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT UNIQUE,
            username TEXT UNIQUE,
            password_hash TEXT,
            user_handle TEXT NOT NULL,
            challenge TEXT,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the User table schema matches what we expect
pub(super) async fn validate_user_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    let expected_columns = vec![
        ("id", "TEXT"),
        ("email", "TEXT"),
        ("username", "TEXT"),
        ("password_hash", "TEXT"),
        ("user_handle", "TEXT"),
        ("challenge", "TEXT"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn get_user_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    // Ensure tables exist before any operations
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    let (query, value) = match field {
        UserSearchField::Id(id) => (
            format!(r#"SELECT * FROM {table_name} WHERE id = ?"#),
            id.as_str(),
        ),
        UserSearchField::Email(email) => (
            format!(r#"SELECT * FROM {table_name} WHERE email = ?"#),
            email.as_str(),
        ),
        UserSearchField::Username(username) => (
            format!(r#"SELECT * FROM {table_name} WHERE username = ?"#),
            username.as_str(),
        ),
    };

    sqlx::query_as::<_, User>(&query)
        .bind(value)
        .fetch_optional(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))
}

/// Insert the user, or if a row with the same email already exists leave it in
/// place and only touch updated_at. The existing id and user_handle survive, so
/// registering the same email twice never produces a duplicate account.
pub(super) async fn upsert_user_by_email_sqlite(
    pool: &Pool<Sqlite>,
    user: User,
) -> Result<User, UserError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();
    let email = user
        .email
        .clone()
        .ok_or_else(|| UserError::InvalidData("email is required for upsert".to_string()))?;
    let now = chrono::Utc::now();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, email, username, password_hash, user_handle, challenge, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (email) DO UPDATE SET
            updated_at = excluded.updated_at
        "#
    ))
    .bind(&user.id)
    .bind(&email)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.user_handle)
    .bind(&user.challenge)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    // Fetch the surviving row; its id may predate this call
    sqlx::query_as::<_, User>(&format!(r#"SELECT * FROM {table_name} WHERE email = ?"#))
        .bind(&email)
        .fetch_one(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))
}

/// Strict insert used by the password flow; duplicates are an error
pub(super) async fn insert_user_sqlite(pool: &Pool<Sqlite>, user: User) -> Result<User, UserError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, email, username, password_hash, user_handle, challenge, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.user_handle)
    .bind(&user.challenge)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            UserError::AlreadyExists(user.username.clone().unwrap_or_default())
        } else {
            UserError::Storage(e.to_string())
        }
    })?;

    Ok(user)
}

pub(super) async fn set_challenge_sqlite(
    pool: &Pool<Sqlite>,
    user_id: &str,
    challenge: Option<&str>,
) -> Result<(), UserError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();
    let now = chrono::Utc::now();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name}
        SET challenge = ?, updated_at = ?
        WHERE id = ?
        "#
    ))
    .bind(challenge)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(UserError::NotFound);
    }

    Ok(())
}
