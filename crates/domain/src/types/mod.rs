//! Domain types and models
//!
//! Everything here mirrors the JSON contract of the admin API. Field names
//! are camelCase on the wire and snake_case in Rust.

pub mod auth;
pub mod credentials;
pub mod envelope;
pub mod listing;
pub mod package;
pub mod profile;
pub mod tier;

pub use auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, LogoutRequest, RefreshRequest,
    RefreshResponse,
};
pub use credentials::{CredentialKey, CredentialPair};
pub use envelope::ResponseEnvelope;
pub use listing::{ActiveList, PageMeta, Paginated, QueryPairs, SortOrder};
pub use package::{
    CreatePackageRequest, Package, PackageQuery, SwitchPackagesRequest, UpdatePackageRequest,
};
pub use profile::AdminProfile;
pub use tier::{
    CreateTierRequest, DiscountType, PricingTier, ReorderTiersRequest, TierQuery, TierType,
    UpdateTierRequest,
};
