//! Pricing tier commands

use std::sync::Arc;

use memberdesk_domain::constants::{ACTIVE_TIERS_PATH, SWITCH_TIERS_PATH, TIERS_PATH, TIER_PATH};
use memberdesk_domain::{
    ActiveList, CreateTierRequest, Paginated, PricingTier, ReorderTiersRequest, TierQuery,
    TierType, UpdateTierRequest,
};
use serde_json::json;
use tracing::{debug, instrument};
use urlencoding::encode;

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// Commands for `/admin/tier*`
pub struct TierCommands {
    client: Arc<ApiClient>,
}

impl TierCommands {
    /// Commands sent through `client`.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List tiers; unset filters are left out of the query string.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &TierQuery) -> Result<Paginated<PricingTier>, ApiError> {
        let request = ApiRequest::get(TIERS_PATH).query_pairs(query).silent();
        let page: Paginated<PricingTier> = self.client.send_data(request).await?;

        debug!(returned = page.data.len(), total = page.meta.total, "Tiers listed");
        Ok(page)
    }

    /// Tiers occupying active slots for one billing period.
    #[instrument(skip(self))]
    pub async fn active(&self, tier_type: TierType) -> Result<ActiveList<PricingTier>, ApiError> {
        let request = ApiRequest::get(ACTIVE_TIERS_PATH).query("tierType", tier_type).silent();
        self.client.send_data(request).await
    }

    /// Create a tier; the server message is shown.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create(&self, payload: &CreateTierRequest) -> Result<PricingTier, ApiError> {
        self.client.send_data(ApiRequest::post(TIER_PATH).json(payload)?).await
    }

    /// Update tier `id`; the server message is shown.
    #[instrument(skip(self, payload), fields(tier_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        payload: &UpdateTierRequest,
    ) -> Result<PricingTier, ApiError> {
        self.client.send_data(ApiRequest::put(tier_path(id)).json(payload)?).await
    }

    /// Deactivate tier `id`.
    #[instrument(skip(self), fields(tier_id = %id))]
    pub async fn deactivate(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/deactivate", tier_path(id));
        self.client.send(ApiRequest::put(path).body(json!({})).silent()).await?;
        Ok(())
    }

    /// Mark tier `id` as recommended.
    #[instrument(skip(self), fields(tier_id = %id))]
    pub async fn set_recommended(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/set-recommended", tier_path(id));
        self.client.send(ApiRequest::put(path).body(json!({})).silent()).await?;
        Ok(())
    }

    /// Swap two active slots.
    #[instrument(skip(self, payload))]
    pub async fn reorder(&self, payload: &ReorderTiersRequest) -> Result<(), ApiError> {
        self.client.send(ApiRequest::put(SWITCH_TIERS_PATH).json(payload)?).await?;
        Ok(())
    }

    /// Delete tier `id`.
    #[instrument(skip(self), fields(tier_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.send(ApiRequest::delete(tier_path(id)).silent()).await?;
        Ok(())
    }
}

fn tier_path(id: &str) -> String {
    format!("{}/{}", TIER_PATH, encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ids_are_percent_encoded() {
        assert_eq!(tier_path("a b/c"), "/admin/tier/a%20b%2Fc");
    }
}
