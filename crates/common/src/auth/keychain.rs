//! Platform keychain credential store.
//!
//! Each credential is one keychain entry under the configured service name,
//! with the storage key (`accessToken`, `refreshToken`) as the account.

use async_trait::async_trait;
use keyring::Entry;
use memberdesk_domain::CredentialKey;
use tracing::debug;

use super::traits::{CredentialStore, CredentialStoreError};

/// Credential store backed by macOS Keychain, Windows Credential Manager or
/// the Linux Secret Service
#[derive(Debug, Clone)]
pub struct KeychainCredentialStore {
    service_name: String,
}

impl KeychainCredentialStore {
    /// # Examples
    /// ```no_run
    /// use memberdesk_common::KeychainCredentialStore;
    ///
    /// let store = KeychainCredentialStore::new("Memberdesk.admin");
    /// ```
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: CredentialKey) -> Result<Entry, CredentialStoreError> {
        Entry::new(&self.service_name, key.as_str()).map_err(|e| {
            CredentialStoreError::Keychain(format!("Failed to open entry {key}: {e}"))
        })
    }

    fn delete(&self, key: CredentialKey) -> Result<(), CredentialStoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CredentialStoreError::Keychain(format!(
                "Failed to delete {key}: {e}"
            ))),
        }
    }
}

#[async_trait]
impl CredentialStore for KeychainCredentialStore {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>, CredentialStoreError> {
        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => {
                Err(CredentialStoreError::Keychain(format!("Failed to read {key}: {e}")))
            }
        }
    }

    async fn set(&self, key: CredentialKey, value: &str) -> Result<(), CredentialStoreError> {
        debug!(service = %self.service_name, key = %key, "Storing credential in keychain");

        self.entry(key)?.set_password(value).map_err(|e| {
            CredentialStoreError::Keychain(format!("Failed to store {key}: {e}"))
        })
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        debug!(service = %self.service_name, "Clearing keychain credentials");

        for key in CredentialKey::ALL {
            self.delete(key)?;
        }
        Ok(())
    }
}
