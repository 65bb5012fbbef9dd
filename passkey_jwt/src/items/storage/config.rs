use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Items table name
pub(crate) static DB_TABLE_ITEMS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_ITEMS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "items"))
});
