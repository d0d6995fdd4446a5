#![allow(dead_code)]

use std::sync::Arc;

use memberdesk_common::testing::{RecordingNotifier, RecordingSessionListener};
use memberdesk_common::MemoryCredentialStore;
use memberdesk_domain::ApiConfig;
use memberdesk_infra::ApiClient;
use wiremock::{MockServer, Request};

/// An API client wired to a mock server with recording doubles.
pub struct TestClient {
    pub client: Arc<ApiClient>,
    pub store: MemoryCredentialStore,
    pub notifier: RecordingNotifier,
    pub listener: RecordingSessionListener,
}

impl TestClient {
    /// Client with single-flight refresh (the default).
    pub fn new(server: &MockServer, store: MemoryCredentialStore) -> Self {
        Self::with_config(store, ApiConfig::new(server.uri()))
    }

    /// Client that refreshes once per rejected request.
    pub fn per_request_refresh(server: &MockServer, store: MemoryCredentialStore) -> Self {
        let config = ApiConfig { single_flight_refresh: false, ..ApiConfig::new(server.uri()) };
        Self::with_config(store, config)
    }

    pub fn with_config(store: MemoryCredentialStore, config: ApiConfig) -> Self {
        let notifier = RecordingNotifier::new();
        let listener = RecordingSessionListener::new();
        let client = ApiClient::builder()
            .config(config)
            .store(Arc::new(store.clone()))
            .notifier(Arc::new(notifier.clone()))
            .session_listener(Arc::new(listener.clone()))
            .build()
            .expect("api client should build");

        Self { client: Arc::new(client), store, notifier, listener }
    }
}

/// Requests the server saw on `path`.
pub async fn requests_to(server: &MockServer, path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .into_iter()
        .filter(|request| request.url.path() == path)
        .collect()
}

/// The `Authorization` header of a recorded request.
pub fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
