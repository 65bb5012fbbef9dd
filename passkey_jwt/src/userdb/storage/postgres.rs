use sqlx::{Pool, Postgres};

use crate::storage::validate_postgres_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::config::DB_TABLE_USERS;

// Postgres implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
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
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the User table schema matches what we expect
pub(super) async fn validate_user_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    let expected_columns = vec![
        ("id", "text"),
        ("email", "text"),
        ("username", "text"),
        ("password_hash", "text"),
        ("user_handle", "text"),
        ("challenge", "text"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn get_user_by_field_postgres(
    pool: &Pool<Postgres>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let (query, value) = match field {
        UserSearchField::Id(id) => (
            format!(r#"SELECT * FROM {table_name} WHERE id = $1"#),
            id.as_str(),
        ),
        UserSearchField::Email(email) => (
            format!(r#"SELECT * FROM {table_name} WHERE email = $1"#),
            email.as_str(),
        ),
        UserSearchField::Username(username) => (
            format!(r#"SELECT * FROM {table_name} WHERE username = $1"#),
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
/// place and only touch updated_at. The existing id and user_handle survive.
pub(super) async fn upsert_user_by_email_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();
    let email = user
        .email
        .clone()
        .ok_or_else(|| UserError::InvalidData("email is required for upsert".to_string()))?;
    let now = chrono::Utc::now();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, email, username, password_hash, user_handle, challenge, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (email) DO UPDATE SET
            updated_at = EXCLUDED.updated_at
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

    sqlx::query_as::<_, User>(&format!(r#"SELECT * FROM {table_name} WHERE email = $1"#))
        .bind(&email)
        .fetch_one(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))
}

/// Strict insert used by the password flow; duplicates are an error
pub(super) async fn insert_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, email, username, password_hash, user_handle, challenge, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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

pub(super) async fn set_challenge_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    challenge: Option<&str>,
) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();
    let now = chrono::Utc::now();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name}
        SET challenge = $1, updated_at = $2
        WHERE id = $3
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
