//! Mock implementations of the common seams

use std::sync::Arc;

use async_trait::async_trait;
use memberdesk_domain::CredentialKey;
use parking_lot::Mutex;

use crate::auth::{CredentialStore, CredentialStoreError};
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::session::SessionListener;

/// Notifier that keeps every notification for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    delivered: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.delivered.lock().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NotificationKind::Success)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(NotificationKind::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.delivered.lock().is_empty()
    }

    fn messages(&self, kind: NotificationKind) -> Vec<String> {
        self.delivered
            .lock()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.delivered.lock().push(Notification::success(message));
    }

    fn error(&self, message: &str) {
        self.delivered.lock().push(Notification::error(message));
    }
}

/// Session listener that records each redirect target.
#[derive(Debug, Clone, Default)]
pub struct RecordingSessionListener {
    redirects: Arc<Mutex<Vec<String>>>,
}

impl RecordingSessionListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().clone()
    }

    pub fn expired_count(&self) -> usize {
        self.redirects.lock().len()
    }
}

impl SessionListener for RecordingSessionListener {
    fn session_expired(&self, login_route: &str) {
        self.redirects.lock().push(login_route.to_string());
    }
}

/// Credential store whose every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCredentialStore;

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>, CredentialStoreError> {
        Err(CredentialStoreError::Keychain(format!("unavailable: {key}")))
    }

    async fn set(&self, key: CredentialKey, _value: &str) -> Result<(), CredentialStoreError> {
        Err(CredentialStoreError::Keychain(format!("unavailable: {key}")))
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        Err(CredentialStoreError::Keychain("unavailable".to_string()))
    }
}
