//! In-process credential store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use memberdesk_domain::CredentialKey;
use parking_lot::RwLock;

use super::traits::{CredentialStore, CredentialStoreError};

/// Credential store backed by a shared map.
///
/// Clones share the same map, so a test can hand one clone to the client
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    entries: Arc<RwLock<HashMap<CredentialKey, String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with both tokens already stored.
    pub fn with_tokens(access_token: &str, refresh_token: &str) -> Self {
        let store = Self::new();
        {
            let mut entries = store.entries.write();
            entries.insert(CredentialKey::AccessToken, access_token.to_string());
            entries.insert(CredentialKey::RefreshToken, refresh_token.to_string());
        }
        store
    }

    /// Synchronous read, for assertions.
    pub fn snapshot(&self, key: CredentialKey) -> Option<String> {
        self.entries.read().get(&key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>, CredentialStoreError> {
        Ok(self.snapshot(key))
    }

    async fn set(&self, key: CredentialKey, value: &str) -> Result<(), CredentialStoreError> {
        self.entries.write().insert(key, value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        self.entries.write().clear();
        Ok(())
    }
}
