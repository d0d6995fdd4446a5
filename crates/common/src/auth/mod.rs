//! Credential storage
//!
//! The access/refresh token pair lives behind a single [`CredentialStore`]
//! so that every read and write goes through one injectable, mockable seam.
//!
//! | Backend | Durability | Notes |
//! |---|---|---|
//! | [`MemoryCredentialStore`] | process | tests, `memory` backend |
//! | [`FileCredentialStore`] | disk | plain JSON, unencrypted |
//! | `KeychainCredentialStore` | platform keychain | feature `keychain` |

pub mod file;
#[cfg(feature = "keychain")]
pub mod keychain;
pub mod memory;
pub mod traits;

pub use file::FileCredentialStore;
#[cfg(feature = "keychain")]
pub use keychain::KeychainCredentialStore;
pub use memory::MemoryCredentialStore;
pub use traits::{CredentialStore, CredentialStoreError};
