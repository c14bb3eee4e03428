use async_trait::async_trait;
use chrono::Utc;
use prep_core::model::Credential;
use sqlx::Row;

use crate::repository::{CREDENTIAL_KEY, CredentialStore, StorageError};

use super::SqliteRepository;

#[async_trait]
impl CredentialStore for SqliteRepository {
    async fn load_credential(&self) -> Result<Option<Credential>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value
            FROM local_store
            WHERE key = ?1
            ",
        )
        .bind(CREDENTIAL_KEY)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Credential::new(value))
    }

    async fn save_credential(&self, credential: &Credential) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO local_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(CREDENTIAL_KEY)
        .bind(credential.expose())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear_credential(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_store WHERE key = ?1")
            .bind(CREDENTIAL_KEY)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
