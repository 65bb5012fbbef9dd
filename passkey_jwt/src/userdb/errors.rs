use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for UserError {
    fn from(err: serde_json::Error) -> Self {
        UserError::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use crate::userdb::UserStore;
    use serial_test::serial;

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();

        let user_error = UserError::from(json_error);

        match user_error {
            UserError::InvalidData(msg) => {
                assert!(
                    msg.contains("expected value"),
                    "Error message should contain the original error"
                );
            }
            _ => panic!("Expected InvalidData variant"),
        }
    }

    #[test]
    fn test_already_exists_display() {
        let error = UserError::AlreadyExists("bob".to_string());
        assert_eq!(error.to_string(), "User already exists: bob");
    }

    #[tokio::test]
    #[serial]
    async fn test_not_found_error_in_context() {
        init_test_environment().await;

        let result = UserStore::get_user("nonexistent_user_id").await;

        // Lookup of a missing user succeeds with None rather than erroring
        assert!(result.is_ok());
        assert!(
            result
                .expect("Getting non-existent user should succeed")
                .is_none()
        );

        async fn get_existing_user(id: &str) -> Result<crate::userdb::User, UserError> {
            match UserStore::get_user(id).await? {
                Some(user) => Ok(user),
                None => Err(UserError::NotFound),
            }
        }

        let result = get_existing_user("nonexistent_user_id").await;
        assert!(matches!(result, Err(UserError::NotFound)));
    }
}
