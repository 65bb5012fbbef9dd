//! Shared test initialization.
//!
//! Loads `.env_test`, removes any leftover SQLite test database file, and
//! initializes every store. SQLite operations ensure their tables exist at
//! the point of use, so no retry logic is needed here.

use std::sync::Once;

/// Centralized test setup for all tests in the crate.
///
/// The environment is loaded once per process from `.env_test` (falling back
/// to `.env`); store initialization is cheap and runs on every call.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        // Start each test run from an empty database
        if let Some(db_path) = extract_sqlite_file_path() {
            let _ = std::fs::remove_file(&db_path);
        }
    });

    ensure_database_initialized().await;
}

async fn ensure_database_initialized() {
    use crate::items::ItemStore;
    use crate::passkey::PasskeyStore;
    use crate::userdb::UserStore;

    // Log errors but don't panic; individual tests will surface real failures
    if let Err(e) = UserStore::init().await {
        eprintln!("Warning: Failed to initialize UserStore: {e}");
    }
    if let Err(e) = PasskeyStore::init().await {
        eprintln!("Warning: Failed to initialize PasskeyStore: {e}");
    }
    if let Err(e) = ItemStore::init().await {
        eprintln!("Warning: Failed to initialize ItemStore: {e}");
    }
}

/// Extract the file path from a SQLite database URL.
///
/// Supports `sqlite:/path`, `sqlite://path` and `sqlite:file:path?options`
/// forms; returns None for in-memory databases and non-SQLite URLs.
fn extract_sqlite_file_path_from_url(url: &str) -> Option<String> {
    let path = url.strip_prefix("sqlite:")?;

    if let Some(file_path) = path.strip_prefix("file:") {
        let path_only = file_path.split('?').next()?;
        if path_only.contains(":memory:") {
            return None;
        }
        Some(path_only.to_string())
    } else {
        let path = path.strip_prefix("//").unwrap_or(path);
        if path.contains(":memory:") {
            return None;
        }
        Some(path.to_string())
    }
}

fn extract_sqlite_file_path() -> Option<String> {
    std::env::var("GENERIC_DATA_STORE_URL")
        .ok()
        .and_then(|url| extract_sqlite_file_path_from_url(&url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sqlite_file_path_from_url() {
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:/tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:./test.db"),
            Some("./test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:///tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:file:/tmp/test.db?mode=rwc"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(extract_sqlite_file_path_from_url("sqlite::memory:"), None);
        assert_eq!(
            extract_sqlite_file_path_from_url("postgresql://localhost/test"),
            None
        );
        assert_eq!(extract_sqlite_file_path_from_url(""), None);
    }
}
