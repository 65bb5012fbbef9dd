use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An item owned by a single user. All access is scoped to the owner;
/// no operation can see or touch another user's items.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Item {
    /// Unique item identifier (UUID v4)
    pub id: String,
    /// Owning user's database ID
    #[serde(skip_serializing, default)]
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(user_id: &str, name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}
