//! Terminal implementations of the notification and session seams.

use memberdesk_common::{Notifier, SessionListener};

/// Prints notifications to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        eprintln!("✔ {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("✖ {message}");
    }
}

/// Tells the user how to get back in once the session is gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSessionListener;

impl SessionListener for TerminalSessionListener {
    fn session_expired(&self, login_route: &str) {
        tracing::debug!(login_route, "session expired");
        eprintln!("Run `memberdesk login` to sign in again.");
    }
}
