//! Authenticated API client
//!
//! Every admin call goes through [`ApiClient::send`], which owns bearer
//! attachment, success/error notifications, the one-shot refresh-and-retry
//! on 401 and the terminal session-expiry path.
//!
//! ```text
//! INIT --(attach token, transmit)--> PENDING
//! PENDING --(2xx, no error_code)--> SUCCESS
//! PENDING --(2xx, error_code present)--> BUSINESS_FAILURE
//! PENDING --(401, initial)--> REFRESHING
//! PENDING --(401, retried)--> SESSION_EXPIRED
//! PENDING --(other error)--> TRANSPORT_FAILURE
//! REFRESHING --(refresh success)--> PENDING (retried, new token attached)
//! REFRESHING --(refresh failure)--> SESSION_EXPIRED
//! ```

use std::sync::Arc;

use memberdesk_common::{
    CredentialStore, Notifier, SessionListener, TracingNotifier, TracingSessionListener,
};
use memberdesk_domain::constants::{
    BUSINESS_ERROR_FALLBACK, BUSINESS_NOTIFICATION_FALLBACK, DEFAULT_LOGIN_ROUTE,
    SESSION_EXPIRED_MESSAGE, UNEXPECTED_ERROR_FALLBACK,
};
use memberdesk_domain::{
    impl_wire_enum_conversions, ApiConfig, Config, CredentialKey, ResponseEnvelope,
};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use super::auth::{HttpTokenRefresher, TokenRefresher};
use super::errors::ApiError;
use super::request::ApiRequest;
use crate::http::HttpClient;

/// States a single call moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    /// Accepted, nothing sent yet
    Init,
    /// Transmitted, awaiting the response
    Pending,
    /// Access token rejected, refresh in progress
    Refreshing,
    /// 2xx without a business error code
    Success,
    /// 2xx carrying `error_code`
    BusinessFailure,
    /// Network failure or a non-2xx other than a handled 401
    TransportFailure,
    /// Credentials wiped and the login redirect issued
    SessionExpired,
}

impl CallState {
    /// Whether the call ends in this state.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Success | Self::BusinessFailure | Self::TransportFailure | Self::SessionExpired
        )
    }
}

impl_wire_enum_conversions!(CallState {
    Init => "INIT",
    Pending => "PENDING",
    Refreshing => "REFRESHING",
    Success => "SUCCESS",
    BusinessFailure => "BUSINESS_FAILURE",
    TransportFailure => "TRANSPORT_FAILURE",
    SessionExpired => "SESSION_EXPIRED",
});

/// API client wrapping every outbound admin call
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    login_route: String,
    single_flight_refresh: bool,
    store: Arc<dyn CredentialStore>,
    refresher: Arc<dyn TokenRefresher>,
    notifier: Arc<dyn Notifier>,
    session_listener: Arc<dyn SessionListener>,
    // Held for the whole refresh when single-flight is on.
    refresh_gate: Mutex<()>,
}

impl ApiClient {
    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Base URL relative request paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The credential store this client reads tokens from.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Send a request through the authentication state machine.
    ///
    /// Resolves with the decoded body on success. A first 401 is answered
    /// with one refresh and one retry; the caller never sees that 401.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Business`] when a 2xx body carries `error_code`
    /// - [`ApiError::Http`] / [`ApiError::Network`] for transport failures
    /// - [`ApiError::SessionExpired`] after credentials have been wiped
    #[instrument(
        skip_all,
        fields(
            request_id = %Uuid::now_v7(),
            method = %request.method(),
            path = %request.path(),
        )
    )]
    pub async fn send(&self, request: ApiRequest) -> Result<ResponseEnvelope, ApiError> {
        let mut request = request;
        debug!(state = %CallState::Init, "accepted request");

        loop {
            let token = match request.bearer_override() {
                Some(token) => Some(token.to_string()),
                None => self.store.get(CredentialKey::AccessToken).await?,
            };

            debug!(
                state = %CallState::Pending,
                attempt = %request.attempt(),
                authenticated = token.is_some(),
                "transmitting"
            );

            let response = match self.transmit(&request, token.as_deref()).await {
                Ok(response) => response,
                Err(err) => return Err(self.transport_failure(err)),
            };
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED
                && request.request_options().refresh_on_unauthorized
            {
                if request.attempt().is_retried() {
                    return Err(self.expire_session("401 on retried request").await);
                }

                debug!(state = %CallState::Refreshing, "access token rejected");
                let fresh = match self.refresh_access_token(token.as_deref()).await {
                    Ok(fresh) => fresh,
                    Err(err) => {
                        warn!(error = %err, "token refresh failed");
                        return Err(self.expire_session("refresh failed").await);
                    }
                };

                request = match request.retried_with(fresh) {
                    Some(retried) => retried,
                    None => return Err(self.expire_session("retry already spent").await),
                };
                continue;
            }

            return self.complete(&request, status, response).await;
        }
    }

    /// Send and decode the envelope's `data` field.
    pub async fn send_data<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let envelope = self.send(request).await?;
        decode_data(&envelope)
    }

    /// `GET` with default options.
    pub async fn get(&self, path: &str) -> Result<ResponseEnvelope, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    /// `POST` a JSON body with default options.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    /// `PUT` a JSON body with default options.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    /// `DELETE` with default options.
    pub async fn delete(&self, path: &str) -> Result<ResponseEnvelope, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    /// `GET` and decode `data`.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_data(ApiRequest::get(path)).await
    }

    /// Resolve a request path against the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let path = request.path();
        let mut url = if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)
        } else {
            let base = self.base_url.as_str().trim_end_matches('/');
            let separator = if path.starts_with('/') { "" } else { "/" };
            Url::parse(&format!("{base}{separator}{path}"))
        }
        .map_err(|e| ApiError::Client(format!("Invalid request URL for {path}: {e}")))?;

        if !request.query_params().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query_params());
        }
        Ok(url)
    }

    async fn transmit(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let url = self.url_for(request)?;
        let mut builder = self.http.request(request.method().clone(), url);

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.json_body() {
            builder = builder.json(body);
        }

        Ok(self.http.send(builder).await?)
    }

    async fn complete(
        &self,
        request: &ApiRequest,
        status: StatusCode,
        response: Response,
    ) -> Result<ResponseEnvelope, ApiError> {
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                let err = ApiError::Network(format!("Failed to read response body: {err}"));
                return Err(self.transport_failure(err));
            }
        };
        let envelope = decode_envelope(&bytes);
        let options = request.request_options();

        if !status.is_success() {
            let message = envelope.message_text().map_or_else(
                || format!("Request failed with status code {}", status.as_u16()),
                str::to_string,
            );
            let err = ApiError::Http { status: status.as_u16(), message };
            return Err(self.transport_failure(err));
        }

        if let Some(code) = envelope.business_error_code() {
            warn!(state = %CallState::BusinessFailure, error_code = code, "business failure");

            if !options.suppress_error {
                self.notifier
                    .error(envelope.message_text().unwrap_or(BUSINESS_NOTIFICATION_FALLBACK));
            }
            return Err(ApiError::Business {
                code: code.to_string(),
                message: envelope.message_text().unwrap_or(BUSINESS_ERROR_FALLBACK).to_string(),
            });
        }

        if options.show_success {
            if let Some(message) = envelope.message_text() {
                self.notifier.success(message);
            }
        }

        info!(
            state = %CallState::Success,
            status = status.as_u16(),
            attempt = %request.attempt(),
            "request completed"
        );
        Ok(envelope)
    }

    fn transport_failure(&self, err: ApiError) -> ApiError {
        warn!(state = %CallState::TransportFailure, error = %err, "request failed");

        let message = err.user_message();
        if message.is_empty() {
            self.notifier.error(UNEXPECTED_ERROR_FALLBACK);
        } else {
            self.notifier.error(&message);
        }
        err
    }

    async fn expire_session(&self, reason: &str) -> ApiError {
        warn!(
            state = %CallState::SessionExpired,
            reason,
            login_route = %self.login_route,
            "session expired"
        );

        self.clear_credentials().await;
        self.notifier.error(SESSION_EXPIRED_MESSAGE);
        self.session_listener.session_expired(&self.login_route);

        ApiError::SessionExpired
    }

    async fn clear_credentials(&self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear credentials");
        }
    }

    /// Obtain a fresh access token after `rejected` was refused.
    async fn refresh_access_token(&self, rejected: Option<&str>) -> Result<String, ApiError> {
        if !self.single_flight_refresh {
            return self.refresh_now().await;
        }

        let _gate = self.refresh_gate.lock().await;

        // Another call may have finished a refresh (or expired the session)
        // while this one waited on the gate.
        match self.store.get(CredentialKey::AccessToken).await? {
            Some(current) if Some(current.as_str()) != rejected => {
                debug!("reusing token refreshed by a concurrent call");
                Ok(current)
            }
            None if rejected.is_some() => {
                Err(ApiError::Refresh("credentials cleared by a concurrent call".to_string()))
            }
            _ => {
                let refreshed = self.refresh_now().await;
                if refreshed.is_err() {
                    // Waiters must see the cleared store, not the rejected token.
                    self.clear_credentials().await;
                }
                refreshed
            }
        }
    }

    async fn refresh_now(&self) -> Result<String, ApiError> {
        let refresh_token = self.store.get(CredentialKey::RefreshToken).await?;
        let tokens = self.refresher.refresh(refresh_token.as_deref()).await?;

        self.store.set(CredentialKey::AccessToken, &tokens.access_token).await?;
        if let Some(rotated) = &tokens.refresh_token {
            self.store.set(CredentialKey::RefreshToken, rotated).await?;
        }

        debug!(rotated = tokens.refresh_token.is_some(), "access token refreshed");
        Ok(tokens.access_token)
    }
}

/// Decode a body, keeping non-JSON text as a string `data`.
fn decode_envelope(bytes: &[u8]) -> ResponseEnvelope {
    ResponseEnvelope::from_slice(bytes).unwrap_or_else(|_| ResponseEnvelope {
        data: Some(Value::String(String::from_utf8_lossy(bytes).into_owned())),
        ..ResponseEnvelope::default()
    })
}

pub(crate) fn decode_data<T: DeserializeOwned>(envelope: &ResponseEnvelope) -> Result<T, ApiError> {
    envelope
        .data_as()
        .map_err(|e| ApiError::Client(format!("Failed to parse response data: {e}")))
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    login_route: Option<String>,
    http: Option<HttpClient>,
    store: Option<Arc<dyn CredentialStore>>,
    refresher: Option<Arc<dyn TokenRefresher>>,
    notifier: Option<Arc<dyn Notifier>>,
    session_listener: Option<Arc<dyn SessionListener>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Take API settings and the login route from the application config.
    pub fn app_config(mut self, config: &Config) -> Self {
        self.config = Some(config.api.clone());
        self.login_route = Some(config.session.login_route.clone());
        self
    }

    /// Route the session listener is sent to on expiry.
    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = Some(route.into());
        self
    }

    /// Use a preconfigured transport instead of one built from the config.
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Credential store (required).
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the HTTP refresher.
    pub fn refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Where success and error messages go.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Receives the login redirect on session expiry.
    pub fn session_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.session_listener = Some(listener);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the store is missing, the base URL does not parse or
    /// the transport cannot be created
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let store =
            self.store.ok_or_else(|| ApiError::Config("Credential store not set".to_string()))?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL {}: {e}", config.base_url)))?;

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::from_config(&config)?,
        };
        let refresher = match self.refresher {
            Some(refresher) => refresher,
            None => Arc::new(HttpTokenRefresher::new(http.clone(), config.resolved_refresh_url())),
        };

        Ok(ApiClient {
            http,
            base_url,
            login_route: self.login_route.unwrap_or_else(|| DEFAULT_LOGIN_ROUTE.to_string()),
            single_flight_refresh: config.single_flight_refresh,
            store,
            refresher,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
            session_listener: self
                .session_listener
                .unwrap_or_else(|| Arc::new(TracingSessionListener)),
            refresh_gate: Mutex::new(()),
        })
    }
}

#[cfg(test)]
mod tests {
    use memberdesk_common::testing::{
        FailingCredentialStore, RecordingNotifier, RecordingSessionListener,
    };
    use memberdesk_common::MemoryCredentialStore;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    struct Harness {
        client: ApiClient,
        store: MemoryCredentialStore,
        notifier: RecordingNotifier,
        listener: RecordingSessionListener,
    }

    fn harness(server: &MockServer, store: MemoryCredentialStore) -> Harness {
        let notifier = RecordingNotifier::new();
        let listener = RecordingSessionListener::new();
        let client = ApiClient::builder()
            .config(ApiConfig::new(server.uri()))
            .store(Arc::new(store.clone()))
            .notifier(Arc::new(notifier.clone()))
            .session_listener(Arc::new(listener.clone()))
            .build()
            .expect("api client");
        Harness { client, store, notifier, listener }
    }

    #[test]
    fn call_state_terminality() {
        assert!(CallState::Success.is_terminal());
        assert!(CallState::SessionExpired.is_terminal());
        assert!(!CallState::Refreshing.is_terminal());
        assert_eq!(CallState::BusinessFailure.to_string(), "BUSINESS_FAILURE");
    }

    #[test]
    fn builder_requires_store() {
        let result = ApiClient::builder().build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn builder_rejects_bad_base_url() {
        let result = ApiClient::builder()
            .config(ApiConfig::new("not a url"))
            .store(Arc::new(MemoryCredentialStore::new()))
            .build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn unreadable_store_fails_before_transmitting() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::builder()
            .config(ApiConfig::new(server.uri()))
            .store(Arc::new(FailingCredentialStore))
            .build()
            .unwrap();

        let err = client.get("/admin/tiers").await.unwrap_err();
        assert!(matches!(err, ApiError::Storage(_)));
    }

    #[tokio::test]
    async fn url_for_joins_paths_and_query() {
        let server = MockServer::start().await;
        let h = harness(&server, MemoryCredentialStore::new());

        let url = h.client.url_for(&ApiRequest::get("admin/tiers").query("take", 10)).unwrap();
        assert_eq!(url.as_str(), format!("{}/admin/tiers?take=10", server.uri()));

        let url = h.client.url_for(&ApiRequest::get("https://other.example.com/x")).unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/x");
    }

    #[tokio::test]
    async fn unauthenticated_when_store_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, MemoryCredentialStore::new());
        h.client.get("/public").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn bearer_override_wins_over_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer OVERRIDE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, MemoryCredentialStore::with_tokens("T1", "R1"));
        h.client.send(ApiRequest::get("/x").bearer("OVERRIDE")).await.unwrap();
    }

    #[tokio::test]
    async fn non_2xx_uses_body_message_and_always_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({ "message": ["name is required"] })),
            )
            .mount(&server)
            .await;

        let h = harness(&server, MemoryCredentialStore::with_tokens("T1", "R1"));
        let err = h
            .client
            .send(ApiRequest::put("/admin/tier/1").suppress_error())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(422));
        assert_eq!(err.user_message(), "name is required");
        assert_eq!(h.notifier.errors(), vec!["name is required"]);
    }

    #[tokio::test]
    async fn non_2xx_without_message_uses_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).mount(&server).await;

        let h = harness(&server, MemoryCredentialStore::new());
        let err = h.client.get("/boom").await.unwrap_err();

        assert_eq!(err.user_message(), "Request failed with status code 500");
    }

    #[tokio::test]
    async fn login_style_request_reports_401_without_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let h = harness(&server, MemoryCredentialStore::with_tokens("OLD", "R0"));
        let err = h
            .client
            .send(ApiRequest::post("/admin/auth/login").without_refresh())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(h.listener.expired_count(), 0);
        assert_eq!(h.store.snapshot(CredentialKey::AccessToken).as_deref(), Some("OLD"));
    }

    #[tokio::test]
    async fn text_body_becomes_string_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&server)
            .await;

        let h = harness(&server, MemoryCredentialStore::new());
        let envelope = h.client.send(ApiRequest::get("/ping").query("q", 1)).await.unwrap();

        assert_eq!(envelope.data, Some(json!("pong")));
        assert!(h.notifier.is_empty());
    }

    #[tokio::test]
    async fn rotated_refresh_token_is_persisted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer T1"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "accessToken": "T2", "refreshToken": "R2" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer T2"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let h = harness(&server, MemoryCredentialStore::with_tokens("T1", "R1"));
        h.client.get("/admin/profile/me").await.unwrap();

        assert_eq!(h.store.snapshot(CredentialKey::AccessToken).as_deref(), Some("T2"));
        assert_eq!(h.store.snapshot(CredentialKey::RefreshToken).as_deref(), Some("R2"));
    }
}
