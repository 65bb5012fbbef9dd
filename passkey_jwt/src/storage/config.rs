//! Generic data store selection and table naming

use std::{env, str::FromStr, sync::LazyLock};
use tokio::sync::Mutex;

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};

// Configuration
static GENERIC_DATA_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_TYPE").expect("GENERIC_DATA_STORE_TYPE must be set")
});

static GENERIC_DATA_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_URL").expect("GENERIC_DATA_STORE_URL must be set")
});

pub(crate) static GENERIC_DATA_STORE: LazyLock<Mutex<Box<dyn DataStore>>> = LazyLock::new(|| {
    let store_type = GENERIC_DATA_STORE_TYPE.as_str();
    let store_url = GENERIC_DATA_STORE_URL.as_str();

    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store = match store_type {
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .expect("Failed to parse SQLite connection string")
                .create_if_missing(true);

            Box::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }) as Box<dyn DataStore>
        }
        "postgres" => Box::new(PostgresDataStore {
            pool: sqlx::PgPool::connect_lazy(store_url).expect("Failed to create Postgres pool"),
        }) as Box<dyn DataStore>,
        t => panic!(
            "Unsupported store type: {}. Supported types are 'sqlite' and 'postgres'",
            t
        ),
    };

    Mutex::new(store)
});

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "pj_".to_string()));

#[cfg(test)]
mod tests {
    use std::env;

    // Helper struct to safely manage environment variables during tests
    struct EnvVarGuard {
        key: String,
        original_value: Option<String>,
    }

    impl EnvVarGuard {
        fn new(key: &str, value: &str) -> Self {
            let original_value = env::var(key).ok();

            unsafe {
                env::set_var(key, value);
            }

            Self {
                key: key.to_string(),
                original_value,
            }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            unsafe {
                match &self.original_value {
                    Some(value) => env::set_var(&self.key, value),
                    None => env::remove_var(&self.key),
                }
            }
        }
    }

    #[test]
    fn test_env_var_parsing() {
        // Only verifies that the environment variables are parsed correctly;
        // we don't initialize the LazyLock to avoid side effects
        let _type_guard = EnvVarGuard::new("GENERIC_DATA_STORE_TYPE", "sqlite");
        let _url_guard = EnvVarGuard::new("GENERIC_DATA_STORE_URL", "sqlite::memory:");

        let store_type = env::var("GENERIC_DATA_STORE_TYPE").unwrap();
        let store_url = env::var("GENERIC_DATA_STORE_URL").unwrap();

        assert_eq!(store_type, "sqlite");
        assert_eq!(store_url, "sqlite::memory:");
    }

    #[test]
    fn test_unsupported_store_type() {
        let _type_guard = EnvVarGuard::new("GENERIC_DATA_STORE_TYPE", "unsupported");

        // Simplified version of the store initialization match
        let store_type = env::var("GENERIC_DATA_STORE_TYPE").unwrap();
        let supported = matches!(store_type.as_str(), "sqlite" | "postgres");
        assert!(!supported);
    }

    #[test]
    fn test_db_table_prefix_default() {
        unsafe {
            let original = env::var("DB_TABLE_PREFIX").ok();
            env::remove_var("DB_TABLE_PREFIX");

            let prefix = env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "pj_".to_string());
            assert_eq!(prefix, "pj_");

            if let Some(value) = original {
                env::set_var("DB_TABLE_PREFIX", value);
            }
        }
    }

    #[test]
    fn test_db_table_prefix_custom() {
        let _prefix_guard = EnvVarGuard::new("DB_TABLE_PREFIX", "custom_");

        let prefix = env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "pj_".to_string());
        assert_eq!(prefix, "custom_");
    }
}
