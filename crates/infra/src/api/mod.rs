//! Admin API client
//!
//! - [`client`]: the authenticated client and its per-call state machine
//! - [`request`]: immutable request values with the one-shot retry guard
//! - [`auth`]: refresh primitive plus login/logout/password commands
//! - [`profile`], [`tiers`], [`packages`]: resource command sets

pub mod auth;
pub mod client;
pub mod errors;
pub mod packages;
pub mod profile;
pub mod request;
pub mod tiers;

pub use auth::{AuthCommands, HttpTokenRefresher, TokenRefresher};
pub use client::{ApiClient, ApiClientBuilder, CallState};
pub use errors::{ApiError, ApiErrorCategory};
pub use packages::PackageCommands;
pub use profile::ProfileCommands;
pub use request::{ApiRequest, Attempt, RequestOptions};
pub use tiers::TierCommands;
