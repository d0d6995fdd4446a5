//! Credential store trait and its error type

use async_trait::async_trait;
use memberdesk_domain::{CredentialKey, CredentialPair, MemberdeskError};
use thiserror::Error;

/// Errors raised by credential store backends
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential file is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("keychain access failed: {0}")]
    Keychain(String),

    #[error("credential not found: {0}")]
    NotFound(String),
}

impl From<CredentialStoreError> for MemberdeskError {
    fn from(err: CredentialStoreError) -> Self {
        MemberdeskError::Storage(err.to_string())
    }
}

/// Key-value store for the active credential pair.
///
/// Keys are the plain storage names from [`CredentialKey`]. Implementations
/// are last-writer-wins; nothing here coordinates concurrent writers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a single credential. `Ok(None)` when it was never stored.
    async fn get(&self, key: CredentialKey) -> Result<Option<String>, CredentialStoreError>;

    /// Write a single credential, replacing any previous value.
    async fn set(&self, key: CredentialKey, value: &str) -> Result<(), CredentialStoreError>;

    /// Remove every stored credential. Idempotent.
    async fn clear(&self) -> Result<(), CredentialStoreError>;

    /// The stored pair, or `None` when no access token is present.
    async fn credentials(&self) -> Result<Option<CredentialPair>, CredentialStoreError> {
        let Some(access_token) = self.get(CredentialKey::AccessToken).await? else {
            return Ok(None);
        };
        let refresh_token = self.get(CredentialKey::RefreshToken).await?;
        Ok(Some(CredentialPair { access_token, refresh_token }))
    }

    /// Persist a pair. A missing refresh token leaves the stored one intact.
    async fn store_credentials(&self, pair: &CredentialPair) -> Result<(), CredentialStoreError> {
        self.set(CredentialKey::AccessToken, &pair.access_token).await?;
        if let Some(refresh_token) = &pair.refresh_token {
            self.set(CredentialKey::RefreshToken, refresh_token).await?;
        }
        Ok(())
    }

    /// Whether an access token is stored.
    async fn is_authenticated(&self) -> Result<bool, CredentialStoreError> {
        Ok(self.get(CredentialKey::AccessToken).await?.is_some())
    }
}
