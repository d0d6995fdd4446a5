//! Shared seams for Memberdesk crates.
//!
//! - [`auth`]: the credential store every request reads its bearer token
//!   from, with memory, file and (feature `keychain`) keychain backends
//! - [`notify`]: user-facing success/error notifications
//! - [`session`]: the session-expiry hook that sends the user back to login
//! - [`testing`]: recording doubles (feature `test-utils`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod notify;
pub mod session;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{CredentialStore, CredentialStoreError, FileCredentialStore, MemoryCredentialStore};
#[cfg(feature = "keychain")]
pub use auth::KeychainCredentialStore;
pub use notify::{Notification, NotificationKind, Notifier, TracingNotifier};
pub use session::{SessionListener, TracingSessionListener};
