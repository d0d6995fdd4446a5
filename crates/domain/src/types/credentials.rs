//! Credential pair and its storage keys

use serde::{Deserialize, Serialize};

use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Key under which a credential is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
}

impl CredentialKey {
    /// Every key, in the order they are written.
    pub const ALL: [Self; 2] = [Self::AccessToken, Self::RefreshToken];

    /// Storage key as persisted.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => ACCESS_TOKEN_KEY,
            Self::RefreshToken => REFRESH_TOKEN_KEY,
        }
    }
}

impl std::fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active access/refresh token pair.
///
/// Absence of an access token means "logged out"; the refresh token may be
/// missing independently.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token }
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_storage_names() {
        assert_eq!(CredentialKey::AccessToken.as_str(), "accessToken");
        assert_eq!(CredentialKey::RefreshToken.to_string(), "refreshToken");
    }

    #[test]
    fn debug_redacts_tokens() {
        let pair = CredentialPair::new("T1", Some("R1".to_string()));
        let rendered = format!("{pair:?}");

        assert!(!rendered.contains("T1"));
        assert!(!rendered.contains("R1"));
        assert!(rendered.contains("<redacted>"));
    }
}
