use chrono::{DateTime, Utc};

use crate::storage::GENERIC_DATA_STORE;

use crate::passkey::errors::PasskeyError;
use crate::passkey::types::{CredentialSearchField, PasskeyCredential};

use super::postgres::*;
use super::sqlite::*;

pub struct PasskeyStore;

impl PasskeyStore {
    /// Initialize the passkey credential tables
    pub(crate) async fn init() -> Result<(), PasskeyError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_passkey_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_passkey_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(PasskeyError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    /// Persist a credential; replaces an existing row with the same ID
    #[tracing::instrument(skip(credential), fields(credential_id = %credential.credential_id, user_id = %credential.user_id))]
    pub async fn store_credential(credential: PasskeyCredential) -> Result<(), PasskeyError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            store_credential_sqlite(pool, &credential).await
        } else if let Some(pool) = store.as_postgres() {
            store_credential_postgres(pool, &credential).await
        } else {
            Err(PasskeyError::Storage(
                "Unsupported database type".to_string(),
            ))
        };

        match &result {
            Ok(()) => {
                tracing::info!("Credential stored");
            }
            Err(e) => {
                tracing::error!(error = %e, "Credential store failed");
            }
        }

        result
    }

    #[tracing::instrument(fields(credential_id = %credential_id))]
    pub async fn get_credential(credential_id: &str) -> Result<Option<PasskeyCredential>, PasskeyError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_credential_sqlite(pool, credential_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_credential_postgres(pool, credential_id).await
        } else {
            Err(PasskeyError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    #[tracing::instrument(fields(field = %field.as_str()))]
    pub async fn get_credentials_by(
        field: CredentialSearchField,
    ) -> Result<Vec<PasskeyCredential>, PasskeyError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            get_credentials_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = store.as_postgres() {
            get_credentials_by_field_postgres(pool, &field).await
        } else {
            Err(PasskeyError::Storage(
                "Unsupported database type".to_string(),
            ))
        };

        match &result {
            Ok(credentials) => {
                tracing::debug!(count = credentials.len(), "Credential lookup completed");
            }
            Err(e) => {
                tracing::error!(error = %e, "Credential lookup failed");
            }
        }

        result
    }

    /// Update the serialized passkey and signature counter after a
    /// successful authentication
    #[tracing::instrument(skip(public_key), fields(credential_id = %credential_id, counter = counter))]
    pub async fn update_credential(
        credential_id: &str,
        public_key: &str,
        counter: i64,
        last_used_at: DateTime<Utc>,
    ) -> Result<(), PasskeyError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            update_credential_sqlite(pool, credential_id, public_key, counter, last_used_at).await
        } else if let Some(pool) = store.as_postgres() {
            update_credential_postgres(pool, credential_id, public_key, counter, last_used_at).await
        } else {
            Err(PasskeyError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    #[tracing::instrument(fields(field = %field.as_str()))]
    pub async fn delete_credential_by(field: CredentialSearchField) -> Result<(), PasskeyError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_credential_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = store.as_postgres() {
            delete_credential_by_field_postgres(pool, &field).await
        } else {
            Err(PasskeyError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}
