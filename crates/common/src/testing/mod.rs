//! Testing utilities
//!
//! Recording doubles for the notification and session seams. Credential
//! stores need no double: [`crate::MemoryCredentialStore`] already is one.

pub mod mocks;

pub use mocks::{FailingCredentialStore, RecordingNotifier, RecordingSessionListener};
