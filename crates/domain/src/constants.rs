//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Credential storage keys (plain strings, no encoding)
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

// Auth endpoints
pub const LOGIN_PATH: &str = "/admin/auth/login";
pub const LOGOUT_PATH: &str = "/admin/auth/logout";
pub const CHANGE_PASSWORD_PATH: &str = "/admin/auth/change-password";
pub const REFRESH_PATH: &str = "/auth/refresh";

// Resource endpoints
pub const PROFILE_ME_PATH: &str = "/admin/profile/me";
pub const TIERS_PATH: &str = "/admin/tiers";
pub const ACTIVE_TIERS_PATH: &str = "/admin/tiers/active";
pub const SWITCH_TIERS_PATH: &str = "/admin/tiers/switch";
pub const TIER_PATH: &str = "/admin/tier";
pub const PACKAGE_PATH: &str = "/admin/package";
pub const ACTIVE_PACKAGES_PATH: &str = "/admin/package/active";
pub const SWITCH_PACKAGES_PATH: &str = "/admin/package/switch-positions";

// Session
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

// Transport defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: usize = 1;
/// Initial send plus at most one resend
pub const MAX_TRANSPORT_ATTEMPTS: usize = 2;
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "Memberdesk.admin";
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

// User-facing fallback messages
pub const BUSINESS_NOTIFICATION_FALLBACK: &str = "Something went wrong";
pub const BUSINESS_ERROR_FALLBACK: &str = "Business logic error";
pub const UNEXPECTED_ERROR_FALLBACK: &str = "Unexpected error";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
