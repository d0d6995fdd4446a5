//! # Memberdesk Infrastructure
//!
//! I/O implementations for the Memberdesk admin client.
//!
//! This crate contains:
//! - The authenticated admin API client and its command sets
//! - The HTTP transport (reqwest) with bounded transport retries
//! - Configuration loading from environment and files
//! - Credential store selection
//!
//! ## Architecture
//! - Wire types come from `memberdesk-domain`
//! - Storage, notification and session seams come from `memberdesk-common`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::*;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, RetryPolicy};
pub use storage::{credential_store, default_credentials_path};
