//! Session-expiry hook

use tracing::warn;

/// Receives the terminal "session expired" transition.
///
/// Called after credentials have been wiped; implementations send the user
/// to `login_route` (a redirect, a CLI hint, a window swap).
pub trait SessionListener: Send + Sync {
    fn session_expired(&self, login_route: &str);
}

/// Listener that only logs the redirect
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSessionListener;

impl SessionListener for TracingSessionListener {
    fn session_expired(&self, login_route: &str) {
        warn!(login_route, "Session expired; redirecting to login");
    }
}
