use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced by secret-store backends.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretStoreError {
    /// No credential blob has been stored yet.
    #[error("no stored credentials found")]
    NotFound,
    /// The external secret-storage helper is not installed.
    #[error("secret-storage helper not found: {helper}")]
    HelperMissing { helper: String },
    /// Underlying storage failure.
    #[error("storage failure: {reason}")]
    Storage { reason: String },
}

/// Contract for persisting the single credential blob in OS secret storage.
/// Backends delegate encryption to the platform secret service; none of them
/// store plaintext on disk themselves.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Short backend name used for logging and status output.
    fn name(&self) -> &'static str;

    /// Persist the blob, overwriting any existing entry.
    async fn put(&self, blob: &str) -> Result<(), SecretStoreError>;

    /// Retrieve the stored blob.
    async fn get(&self) -> Result<String, SecretStoreError>;

    /// Remove the stored blob (idempotent).
    async fn delete(&self) -> Result<(), SecretStoreError>;
}

/// In-memory secret store for tests and smoke runs.
#[derive(Debug, Default, Clone)]
pub struct InMemorySecretStore {
    inner: Arc<Mutex<Option<String>>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, blob: &str) -> Result<(), SecretStoreError> {
        let mut slot = self.inner.lock().map_err(|err| SecretStoreError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;
        *slot = Some(blob.to_string());
        Ok(())
    }

    async fn get(&self) -> Result<String, SecretStoreError> {
        let slot = self.inner.lock().map_err(|err| SecretStoreError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;
        slot.clone().ok_or(SecretStoreError::NotFound)
    }

    async fn delete(&self) -> Result<(), SecretStoreError> {
        let mut slot = self.inner.lock().map_err(|err| SecretStoreError::Storage {
            reason: format!("lock poisoned: {err}"),
        })?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_stores_and_returns_blob() {
        let store = InMemorySecretStore::new();
        store.put("{\"k\":1}").await.expect("put should succeed");
        let blob = store.get().await.expect("get should succeed");
        assert_eq!(blob, "{\"k\":1}");
    }

    #[tokio::test]
    async fn put_overwrites_existing_blob() {
        let store = InMemorySecretStore::new();
        store.put("old").await.expect("put should succeed");
        store.put("new").await.expect("second put should succeed");
        assert_eq!(store.get().await.expect("get"), "new");
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_removes_data() {
        let store = InMemorySecretStore::new();
        store.put("blob").await.expect("put should succeed");
        store.delete().await.expect("delete should succeed");
        store
            .delete()
            .await
            .expect("delete again should still succeed");

        let err = store.get().await.expect_err("get should fail after delete");
        assert_eq!(err, SecretStoreError::NotFound);
    }
}
