//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_KEYCHAIN_SERVICE, DEFAULT_LOGIN_ROUTE, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS,
    MAX_TRANSPORT_ATTEMPTS, REFRESH_PATH,
};
use crate::impl_wire_enum_conversions;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Admin API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every relative request path is joined onto
    pub base_url: String,
    /// Absolute refresh endpoint; `{base_url}/auth/refresh` when unset
    #[serde(default)]
    pub refresh_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Transport attempts per transmission: 1 never resends, 2 allows one
    /// resend of a safe method
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Share one in-flight refresh between concurrent 401s
    #[serde(default = "default_true")]
    pub single_flight_refresh: bool,
}

impl ApiConfig {
    /// Create a config for `base_url` with every other field defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            single_flight_refresh: true,
        }
    }

    /// `max_attempts` clamped to `1..=MAX_TRANSPORT_ATTEMPTS`.
    pub fn transport_attempts(&self) -> usize {
        self.max_attempts.clamp(1, MAX_TRANSPORT_ATTEMPTS)
    }

    /// Resolve the refresh endpoint.
    pub fn resolved_refresh_url(&self) -> String {
        self.refresh_url.clone().unwrap_or_else(|| {
            format!("{}{}", self.base_url.trim_end_matches('/'), REFRESH_PATH)
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

/// Where the credential pair is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on disk (survives restarts, unencrypted)
    #[default]
    File,
    /// Platform keychain
    Keychain,
    /// Process memory only
    Memory,
}

impl_wire_enum_conversions!(StorageBackend {
    File => "file",
    Keychain => "keychain",
    Memory => "memory",
});

/// Credential storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Credentials file for the `file` backend
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::File, path: None, service_name: default_service_name() }
    }
}

/// Session handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Entry point the user is sent to when the session expires
    #[serde(default = "default_login_route")]
    pub login_route: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { login_route: default_login_route() }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

const fn default_true() -> bool {
    true
}

fn default_service_name() -> String {
    DEFAULT_KEYCHAIN_SERVICE.to_string()
}

fn default_login_route() -> String {
    DEFAULT_LOGIN_ROUTE.to_string()
}
