use async_trait::async_trait;
use herald_core::store::{SecretStore, SecretStoreError};
use keyring::Entry;
use tracing::debug;

/// Keyring-crate backend, matching how the Herald applet loads the blob at
/// runtime (libsecret on Linux, Keychain on macOS, Credential Manager on
/// Windows). Blocking keyring calls run on the blocking pool.
pub struct KeyringStore {
    service: String,
    account: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }

    fn entry(&self) -> Result<Entry, SecretStoreError> {
        Entry::new(&self.service, &self.account).map_err(|e| SecretStoreError::Storage {
            reason: format!("failed to create keyring entry: {e}"),
        })
    }
}

#[async_trait]
impl SecretStore for KeyringStore {
    fn name(&self) -> &'static str {
        "keyring"
    }

    async fn put(&self, blob: &str) -> Result<(), SecretStoreError> {
        debug!(service = %self.service, "storing credential blob in keyring");
        let entry = self.entry()?;
        let blob = blob.to_string();
        tokio::task::spawn_blocking(move || {
            entry
                .set_password(&blob)
                .map_err(|e| SecretStoreError::Storage {
                    reason: format!("failed to store credentials: {e}"),
                })
        })
        .await
        .map_err(|e| SecretStoreError::Storage {
            reason: format!("task join error: {e}"),
        })?
    }

    async fn get(&self) -> Result<String, SecretStoreError> {
        let entry = self.entry()?;
        tokio::task::spawn_blocking(move || match entry.get_password() {
            Ok(blob) => Ok(blob),
            Err(keyring::Error::NoEntry) => Err(SecretStoreError::NotFound),
            Err(e) => Err(SecretStoreError::Storage {
                reason: format!("failed to read credentials: {e}"),
            }),
        })
        .await
        .map_err(|e| SecretStoreError::Storage {
            reason: format!("task join error: {e}"),
        })?
    }

    async fn delete(&self) -> Result<(), SecretStoreError> {
        debug!(service = %self.service, "deleting credential blob from keyring");
        let entry = self.entry()?;
        tokio::task::spawn_blocking(move || match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretStoreError::Storage {
                reason: format!("failed to delete credentials: {e}"),
            }),
        })
        .await
        .map_err(|e| SecretStoreError::Storage {
            reason: format!("task join error: {e}"),
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These need a live secret service; run them locally with --ignored.

    #[tokio::test]
    #[ignore = "requires keyring service"]
    async fn round_trip_through_keyring() {
        let store = KeyringStore::new("herald-test", "credentials");
        let _ = store.delete().await;

        store.put("{\"test\":true}").await.expect("put");
        let blob = store.get().await.expect("get");
        assert_eq!(blob, "{\"test\":true}");

        store.delete().await.expect("delete");
        let err = store.get().await.expect_err("should be gone");
        assert_eq!(err, SecretStoreError::NotFound);
    }

    #[tokio::test]
    #[ignore = "requires keyring service"]
    async fn delete_is_idempotent() {
        let store = KeyringStore::new("herald-test", "credentials-idempotent");
        let _ = store.delete().await;
        store.delete().await.expect("delete on absent entry");
    }
}
