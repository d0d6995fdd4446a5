//! # Memberdesk Domain
//!
//! Wire types and models for the Memberdesk admin API.
//!
//! This crate contains:
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Request/response DTOs (auth, profile, tiers, packages)
//! - The response envelope shared by every endpoint
//! - Domain constants (storage keys, endpoint paths, fallback messages)
//!
//! ## Architecture
//! - No dependencies on other Memberdesk crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
