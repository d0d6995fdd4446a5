//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `MEMBERDESK_API_BASE_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `MEMBERDESK_API_BASE_URL`: Admin API base URL (required)
//! - `MEMBERDESK_REFRESH_URL`: Absolute refresh endpoint
//! - `MEMBERDESK_TIMEOUT_SECS`: Request timeout in seconds
//! - `MEMBERDESK_MAX_ATTEMPTS`: Transport attempts per transmission (1 or 2)
//! - `MEMBERDESK_SINGLE_FLIGHT_REFRESH`: Share one refresh between concurrent 401s
//! - `MEMBERDESK_STORAGE_BACKEND`: `file`, `keychain` or `memory`
//! - `MEMBERDESK_CREDENTIALS_PATH`: Credentials file for the `file` backend
//! - `MEMBERDESK_KEYCHAIN_SERVICE`: Keychain service name
//! - `MEMBERDESK_LOGIN_ROUTE`: Where session expiry sends the user
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./memberdesk.toml` / `./memberdesk.json` (current working directory)
//! 2. `./config.toml` / `./config.json` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use memberdesk_domain::constants::MAX_TRANSPORT_ATTEMPTS;
use memberdesk_domain::{
    ApiConfig, Config, MemberdeskError, Result, SessionConfig, StorageBackend, StorageConfig,
};
use url::Url;

const CONFIG_NAMES: [&str; 4] = ["memberdesk.toml", "memberdesk.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `MemberdeskError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A URL does not parse
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `MEMBERDESK_API_BASE_URL` is required; everything else falls back to
/// its default.
///
/// # Errors
/// Returns `MemberdeskError::Config` if the base URL is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut api = ApiConfig::new(env_var("MEMBERDESK_API_BASE_URL")?);
    api.refresh_url = std::env::var("MEMBERDESK_REFRESH_URL").ok();
    if let Some(timeout) = env_parse::<u64>("MEMBERDESK_TIMEOUT_SECS")? {
        api.timeout_seconds = timeout;
    }
    if let Some(attempts) = env_parse::<usize>("MEMBERDESK_MAX_ATTEMPTS")? {
        api.max_attempts = attempts;
    }
    api.single_flight_refresh = env_bool("MEMBERDESK_SINGLE_FLIGHT_REFRESH", true);

    let mut storage = StorageConfig::default();
    if let Some(backend) = env_parse::<StorageBackend>("MEMBERDESK_STORAGE_BACKEND")? {
        storage.backend = backend;
    }
    storage.path = std::env::var_os("MEMBERDESK_CREDENTIALS_PATH").map(PathBuf::from);
    if let Ok(service) = std::env::var("MEMBERDESK_KEYCHAIN_SERVICE") {
        storage.service_name = service;
    }

    let mut session = SessionConfig::default();
    if let Ok(route) = std::env::var("MEMBERDESK_LOGIN_ROUTE") {
        session.login_route = route;
    }

    let config = Config { api, storage, session };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MemberdeskError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MemberdeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MemberdeskError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MemberdeskError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MemberdeskError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MemberdeskError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(MemberdeskError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Reject configurations the client could not run with.
pub fn validate(config: &Config) -> Result<()> {
    Url::parse(&config.api.base_url).map_err(|e| {
        MemberdeskError::Config(format!("Invalid base_url {}: {}", config.api.base_url, e))
    })?;

    if let Some(refresh_url) = &config.api.refresh_url {
        Url::parse(refresh_url).map_err(|e| {
            MemberdeskError::Config(format!("Invalid refresh_url {}: {}", refresh_url, e))
        })?;
    }

    if config.api.timeout_seconds == 0 {
        return Err(MemberdeskError::Config("timeout_seconds must be positive".to_string()));
    }

    if !(1..=MAX_TRANSPORT_ATTEMPTS).contains(&config.api.max_attempts) {
        return Err(MemberdeskError::Config(format!(
            "max_attempts must be between 1 and {MAX_TRANSPORT_ATTEMPTS}, got {}",
            config.api.max_attempts
        )));
    }

    Ok(())
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        MemberdeskError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| MemberdeskError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
