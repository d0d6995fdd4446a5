//! Authentication endpoints
//!
//! [`TokenRefresher`] is the one-shot refresh primitive. It never goes
//! through [`ApiClient::send`], so a 401 from the refresh endpoint cannot
//! start another refresh, and it is transmitted exactly once whatever the
//! transport's retry policy. [`AuthCommands`] covers login, logout and
//! password changes on top of the authenticated client.

use std::sync::Arc;

use async_trait::async_trait;
use memberdesk_domain::constants::{CHANGE_PASSWORD_PATH, LOGIN_PATH, LOGOUT_PATH};
use memberdesk_domain::{
    ChangePasswordRequest, CredentialKey, LoginRequest, LoginResponse, LogoutRequest,
    RefreshRequest, RefreshResponse, ResponseEnvelope,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;
use crate::http::HttpClient;

/// Trait for exchanging a refresh token for a new access token
///
/// This trait allows dependency injection and testing with mock refreshers.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Exchange `refresh_token` (possibly absent) for fresh tokens.
    ///
    /// Any failure ends the session.
    async fn refresh(&self, refresh_token: Option<&str>) -> Result<RefreshResponse, ApiError>;
}

/// Refresher that POSTs `{ refreshToken }` to the refresh endpoint
pub struct HttpTokenRefresher {
    http: HttpClient,
    refresh_url: String,
}

impl HttpTokenRefresher {
    /// Refresher posting to `refresh_url` over `http`.
    pub fn new(http: HttpClient, refresh_url: impl Into<String>) -> Self {
        Self { http, refresh_url: refresh_url.into() }
    }

    /// Endpoint the refresh is posted to.
    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    #[instrument(skip_all, fields(url = %self.refresh_url, has_refresh_token = refresh_token.is_some()))]
    async fn refresh(&self, refresh_token: Option<&str>) -> Result<RefreshResponse, ApiError> {
        let body = RefreshRequest { refresh_token: refresh_token.map(str::to_string) };
        let request = self.http.request(Method::POST, &self.refresh_url).json(&body);

        let response =
            self.http.send_once(request).await.map_err(|e| ApiError::Refresh(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Refresh(format!("Failed to read refresh response: {e}")))?;

        if !status.is_success() {
            return Err(ApiError::Refresh(format!("refresh endpoint returned {status}")));
        }

        let envelope = ResponseEnvelope::from_slice(&bytes)
            .map_err(|e| ApiError::Refresh(format!("Malformed refresh response: {e}")))?;
        if let Some(code) = envelope.business_error_code() {
            return Err(ApiError::Refresh(format!("refresh rejected with error_code {code}")));
        }

        let tokens: RefreshResponse = decode_tokens(&envelope)
            .map_err(|e| ApiError::Refresh(format!("Refresh response has no access token: {e}")))?;
        if tokens.access_token.is_empty() {
            return Err(ApiError::Refresh("refresh returned an empty access token".to_string()));
        }

        debug!(rotated = tokens.refresh_token.is_some(), "refresh succeeded");
        Ok(tokens)
    }
}

/// Token bodies arrive at the top level; some deployments nest them in `data`.
fn decode_tokens<T: DeserializeOwned>(envelope: &ResponseEnvelope) -> serde_json::Result<T> {
    envelope.body_as().or_else(|err| match envelope.data {
        Some(_) => envelope.data_as(),
        None => Err(err),
    })
}

/// Login, logout and password commands
pub struct AuthCommands {
    client: Arc<ApiClient>,
}

impl AuthCommands {
    /// Commands sent through `client`.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Log in and persist both tokens.
    ///
    /// A 401 here is reported as-is: it means bad credentials, not an
    /// expired session.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { email: email.to_string(), password: password.to_string() };
        let request = ApiRequest::post(LOGIN_PATH).json(&body)?.without_refresh();

        let envelope = self.client.send(request).await?;
        let login: LoginResponse = decode_tokens(&envelope)
            .map_err(|e| ApiError::Client(format!("Failed to parse login response: {e}")))?;

        self.client.store().store_credentials(&login.credentials()).await?;

        info!("Logged in");
        Ok(login)
    }

    /// Log out on the server and forget local credentials.
    ///
    /// Credentials are removed even when the server call fails; that
    /// failure is still returned. A stale access token is refreshed so the
    /// server can still revoke the refresh token; if that refresh fails the
    /// result is [`ApiError::SessionExpired`], with credentials already gone.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let store = self.client.store();
        let refresh_token = store.get(CredentialKey::RefreshToken).await?;

        let request = ApiRequest::post(LOGOUT_PATH).json(&LogoutRequest { refresh_token })?;
        let result = self.client.send(request).await;

        store.clear().await?;

        match result {
            Ok(_) => {
                info!("Logged out");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Logout call failed; local credentials cleared");
                Err(err)
            }
        }
    }

    /// Change the signed-in admin's password.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.client.send(ApiRequest::post(CHANGE_PASSWORD_PATH).json(&body)?).await?;
        Ok(())
    }

    /// Whether an access token is stored.
    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.client.store().is_authenticated().await?)
    }
}
