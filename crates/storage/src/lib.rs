#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{CREDENTIAL_KEY, CredentialStore, InMemoryRepository, Storage, StorageError};
