//! Credential store selection
//!
//! Maps [`StorageConfig`] onto one of the credential store backends.

use std::path::PathBuf;
use std::sync::Arc;

use memberdesk_common::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use memberdesk_domain::constants::DEFAULT_CREDENTIALS_FILE;
use memberdesk_domain::{MemberdeskError, StorageBackend, StorageConfig};

const CREDENTIALS_DIR: &str = ".memberdesk";

/// Build the credential store described by `config`.
///
/// # Errors
/// Returns `MemberdeskError::Config` when the keychain backend is requested
/// from a build without the `keychain` feature.
pub fn credential_store(
    config: &StorageConfig,
) -> Result<Arc<dyn CredentialStore>, MemberdeskError> {
    let store: Arc<dyn CredentialStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryCredentialStore::new()),
        StorageBackend::File => {
            let path = config.path.clone().unwrap_or_else(default_credentials_path);
            tracing::debug!(path = %path.display(), "using file credential store");
            Arc::new(FileCredentialStore::new(path))
        }
        StorageBackend::Keychain => keychain_store(&config.service_name)?,
    };
    Ok(store)
}

/// `$HOME/.memberdesk/credentials.json`, or `credentials.json` in the
/// working directory when no home directory is known.
pub fn default_credentials_path() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(CREDENTIALS_DIR).join(DEFAULT_CREDENTIALS_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE))
}

#[cfg(feature = "keychain")]
fn keychain_store(service_name: &str) -> Result<Arc<dyn CredentialStore>, MemberdeskError> {
    tracing::debug!(service_name, "using keychain credential store");
    Ok(Arc::new(memberdesk_common::KeychainCredentialStore::new(service_name)))
}

#[cfg(not(feature = "keychain"))]
fn keychain_store(_service_name: &str) -> Result<Arc<dyn CredentialStore>, MemberdeskError> {
    Err(MemberdeskError::Config(
        "keychain storage requested but this build lacks the `keychain` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use memberdesk_domain::CredentialKey;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn file_backend_uses_configured_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("creds.json");
        let config = StorageConfig { path: Some(path.clone()), ..StorageConfig::default() };

        let store = credential_store(&config).unwrap();
        store.set(CredentialKey::AccessToken, "T1").await.unwrap();

        assert!(path.exists());
        assert_eq!(store.get(CredentialKey::AccessToken).await.unwrap().as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn memory_backend_starts_empty() {
        let config = StorageConfig { backend: StorageBackend::Memory, ..StorageConfig::default() };
        let store = credential_store(&config).unwrap();
        assert!(!store.is_authenticated().await.unwrap());
    }

    #[cfg(not(feature = "keychain"))]
    #[test]
    fn keychain_without_feature_is_config_error() {
        let config =
            StorageConfig { backend: StorageBackend::Keychain, ..StorageConfig::default() };
        assert!(matches!(credential_store(&config), Err(MemberdeskError::Config(_))));
    }

    #[test]
    fn default_path_ends_with_credentials_file() {
        assert!(default_credentials_path().ends_with(DEFAULT_CREDENTIALS_FILE));
    }
}
