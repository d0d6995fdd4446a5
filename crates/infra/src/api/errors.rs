//! API-specific error types
//!
//! Callers tell business failures (a 2xx body carrying `error_code`) apart
//! from transport failures through [`ApiError::category`] or
//! [`ApiError::error_code`].

use memberdesk_common::CredentialStoreError;
use memberdesk_domain::MemberdeskError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Transport succeeded, the operation did not (`error_code` present)
    Business,
    /// Non-2xx status or network failure
    Transport,
    /// Session expired or the refresh primitive failed
    Session,
    /// Local failures: encoding, decoding, credential storage
    Client,
    /// Misconfiguration - non-retryable
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message} ({code})")]
    Business { code: String, message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Token refresh failed: {0}")]
    Refresh(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Business { .. } => ApiErrorCategory::Business,
            Self::Http { .. } | Self::Network(_) => ApiErrorCategory::Transport,
            Self::SessionExpired | Self::Refresh(_) => ApiErrorCategory::Session,
            Self::Client(_) | Self::Storage(_) => ApiErrorCategory::Client,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// The business `error_code`, for programmatic matching.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Business { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_business(&self) -> bool {
        self.category() == ApiErrorCategory::Business
    }

    /// HTTP status of a transport failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Business { message, .. } | Self::Http { message, .. } => message.clone(),
            Self::Network(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<MemberdeskError> for ApiError {
    fn from(err: MemberdeskError) -> Self {
        match err {
            MemberdeskError::Network(message) => Self::Network(message),
            MemberdeskError::Config(message) => Self::Config(message),
            MemberdeskError::Storage(message) => Self::Storage(message),
            MemberdeskError::Auth(message) => Self::Refresh(message),
            MemberdeskError::NotFound(message)
            | MemberdeskError::InvalidInput(message)
            | MemberdeskError::Internal(message) => Self::Client(message),
        }
    }
}

impl From<CredentialStoreError> for ApiError {
    fn from(err: CredentialStoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<ApiError> for MemberdeskError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::SessionExpired | ApiError::Refresh(_) => Self::Auth(err.to_string()),
            ApiError::Network(message) => Self::Network(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::Storage(message) => Self::Storage(message),
            ApiError::Http { status: 404, message } => Self::NotFound(message),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let business = ApiError::Business { code: "DUP".into(), message: "Exists".into() };
        assert_eq!(business.category(), ApiErrorCategory::Business);
        assert_eq!(
            ApiError::Http { status: 500, message: "boom".into() }.category(),
            ApiErrorCategory::Transport
        );
        assert_eq!(ApiError::SessionExpired.category(), ApiErrorCategory::Session);
        assert_eq!(ApiError::Storage("x".into()).category(), ApiErrorCategory::Client);
    }

    #[test]
    fn test_error_code_only_for_business() {
        let business = ApiError::Business { code: "DUP".into(), message: "Exists".into() };
        assert_eq!(business.error_code(), Some("DUP"));
        assert!(business.is_business());
        assert_eq!(ApiError::Network("down".into()).error_code(), None);
    }

    #[test]
    fn test_storage_errors_convert() {
        let err: ApiError = CredentialStoreError::NotFound("accessToken".into()).into();
        assert!(matches!(err, ApiError::Storage(_)));
    }
}
