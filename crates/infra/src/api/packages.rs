//! Package commands
//!
//! Every call here is silent on success; callers report outcomes themselves.

use std::sync::Arc;

use memberdesk_domain::constants::{ACTIVE_PACKAGES_PATH, PACKAGE_PATH, SWITCH_PACKAGES_PATH};
use memberdesk_domain::{
    ActiveList, CreatePackageRequest, Package, PackageQuery, Paginated, SwitchPackagesRequest,
    UpdatePackageRequest,
};
use serde_json::json;
use tracing::instrument;
use urlencoding::encode;

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// Commands for `/admin/package*`
pub struct PackageCommands {
    client: Arc<ApiClient>,
}

impl PackageCommands {
    /// Commands sent through `client`.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Paginated package listing; unset filters are left out.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &PackageQuery) -> Result<Paginated<Package>, ApiError> {
        self.client.send_data(ApiRequest::get(PACKAGE_PATH).query_pairs(query).silent()).await
    }

    /// Packages currently offered.
    #[instrument(skip(self))]
    pub async fn active(&self) -> Result<ActiveList<Package>, ApiError> {
        self.client.send_data(ApiRequest::get(ACTIVE_PACKAGES_PATH).silent()).await
    }

    /// Create a package.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create(&self, payload: &CreatePackageRequest) -> Result<Package, ApiError> {
        self.client.send_data(ApiRequest::post(PACKAGE_PATH).json(payload)?.silent()).await
    }

    /// Update package `id`.
    #[instrument(skip(self, payload), fields(package_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        payload: &UpdatePackageRequest,
    ) -> Result<Package, ApiError> {
        self.client.send_data(ApiRequest::put(package_path(id)).json(payload)?.silent()).await
    }

    /// Withdraw package `id`.
    #[instrument(skip(self), fields(package_id = %id))]
    pub async fn deactivate(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/deactivate", package_path(id));
        self.client.send(ApiRequest::put(path).body(json!({})).silent()).await?;
        Ok(())
    }

    /// Mark package `id` as recommended.
    #[instrument(skip(self), fields(package_id = %id))]
    pub async fn recommend(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/recommend", package_path(id));
        self.client.send(ApiRequest::put(path).body(json!({})).silent()).await?;
        Ok(())
    }

    /// Swap the display positions of two packages.
    #[instrument(skip(self, payload))]
    pub async fn switch_positions(&self, payload: &SwitchPackagesRequest) -> Result<(), ApiError> {
        self.client.send(ApiRequest::put(SWITCH_PACKAGES_PATH).json(payload)?.silent()).await?;
        Ok(())
    }

    /// Delete package `id`.
    #[instrument(skip(self), fields(package_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.send(ApiRequest::delete(package_path(id)).silent()).await?;
        Ok(())
    }
}

fn package_path(id: &str) -> String {
    format!("{}/{}", PACKAGE_PATH, encode(id))
}
