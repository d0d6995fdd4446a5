//! Pricing tiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::listing::{push_pair, QueryPairs, SortOrder};
use crate::impl_wire_enum_conversions;

/// Billing period of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TierType {
    Monthly,
    Yearly,
}

impl_wire_enum_conversions!(TierType {
    Monthly => "MONTHLY",
    Yearly => "YEARLY",
});

/// How `discount_amount` is applied to `original_price`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percent,
    WholeNumber,
}

impl_wire_enum_conversions!(DiscountType {
    Percent => "PERCENT",
    WholeNumber => "WHOLE_NUMBER",
});

/// A subscription tier as returned by the admin API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub id: String,
    pub name: String,
    pub discount_type: DiscountType,
    pub original_price: f64,
    pub discount_amount: f64,
    pub is_recommended: bool,
    pub is_active: bool,
    pub position: i32,
    pub tier_type: TierType,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub monthly_entries: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for `GET /admin/tiers`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierQuery {
    pub tier_type: Option<TierType>,
    pub is_active: Option<bool>,
    pub is_recommended: Option<bool>,
    pub search: Option<String>,
    pub take: Option<u32>,
    pub skip: Option<u32>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
}

impl QueryPairs for TierQuery {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "tierType", self.tier_type);
        push_pair(&mut pairs, "isActive", self.is_active);
        push_pair(&mut pairs, "isRecommended", self.is_recommended);
        push_pair(&mut pairs, "search", self.search.as_deref());
        push_pair(&mut pairs, "take", self.take);
        push_pair(&mut pairs, "skip", self.skip);
        push_pair(&mut pairs, "sortBy", self.sort_by.as_deref());
        push_pair(&mut pairs, "order", self.order);
        pairs
    }
}

/// `POST /admin/tier` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CreateTierRequest {
    pub name: String,
    pub discount_type: DiscountType,
    pub original_price: f64,
    pub discount_amount: f64,
    pub tier_type: TierType,
    pub summary: String,
    pub benefits: Vec<String>,
    pub monthly_entries: u32,
}

/// `PUT /admin/tier/{id}` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UpdateTierRequest {
    pub name: String,
    pub discount_type: DiscountType,
    pub original_price: f64,
    pub discount_amount: f64,
    pub tier_type: TierType,
    pub summary: String,
    pub benefits: Vec<String>,
    pub monthly_entries: u32,
    pub is_recommended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// `PUT /admin/tiers/switch` body; swaps two active slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ReorderTiersRequest {
    pub first_tier_id: String,
    pub second_tier_id: String,
    pub tier_type: TierType,
}
