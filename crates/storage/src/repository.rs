use async_trait::async_trait;
use prep_core::model::Credential;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the session credential is persisted.
pub const CREDENTIAL_KEY: &str = "token";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable home for the single session credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the persisted credential, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn load_credential(&self) -> Result<Option<Credential>, StorageError>;

    /// Persist the credential, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the credential cannot be stored.
    async fn save_credential(&self, credential: &Credential) -> Result<(), StorageError>;

    /// Remove the persisted credential. Removing a missing credential is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    async fn clear_credential(&self) -> Result<(), StorageError>;
}

/// Simple in-memory key/value store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a raw value, bypassing credential validation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryRepository {
    async fn load_credential(&self) -> Result<Option<Credential>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(CREDENTIAL_KEY).cloned().and_then(Credential::new))
    }

    async fn save_credential(&self, credential: &Credential) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(CREDENTIAL_KEY.to_string(), credential.expose().to_string());
        Ok(())
    }

    async fn clear_credential(&self) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(CREDENTIAL_KEY);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub credentials: Arc<dyn CredentialStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let credentials: Arc<dyn CredentialStore> = Arc::new(repo);
        Self { credentials }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_clear_credential() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_credential().await.unwrap().is_none());

        let credential = Credential::new("abc.def.ghi").unwrap();
        repo.save_credential(&credential).await.unwrap();
        assert_eq!(repo.load_credential().await.unwrap(), Some(credential));

        repo.clear_credential().await.unwrap();
        assert!(repo.load_credential().await.unwrap().is_none());
        // Clearing twice is fine.
        repo.clear_credential().await.unwrap();
    }

    #[tokio::test]
    async fn blank_stored_value_reads_as_missing() {
        let repo = InMemoryRepository::new();
        repo.insert_raw(CREDENTIAL_KEY, "   ").unwrap();
        assert!(repo.load_credential().await.unwrap().is_none());
    }
}
