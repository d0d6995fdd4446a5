//! Entry packages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::listing::{push_pair, QueryPairs, SortOrder};

/// A purchasable package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub is_active: bool,
    #[serde(default)]
    pub position: Option<i32>,
    pub giveaway_entries: u32,
    #[serde(default)]
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for `GET /admin/package`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageQuery {
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub take: Option<u32>,
    pub skip: Option<u32>,
    pub sort_by: Option<String>,
    pub order: Option<SortOrder>,
}

impl QueryPairs for PackageQuery {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "isActive", self.is_active);
        push_pair(&mut pairs, "search", self.search.as_deref());
        push_pair(&mut pairs, "take", self.take);
        push_pair(&mut pairs, "skip", self.skip);
        push_pair(&mut pairs, "sortBy", self.sort_by.as_deref());
        push_pair(&mut pairs, "order", self.order);
        pairs
    }
}

/// `POST /admin/package` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub giveaway_entries: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// `PUT /admin/package/{id}` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackageRequest {
    #[serde(flatten)]
    pub fields: CreatePackageRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

/// `PUT /admin/package/switch-positions` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct SwitchPackagesRequest {
    pub first_package_id: String,
    pub second_package_id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn update_request_flattens_create_fields() {
        let body = serde_json::to_value(UpdatePackageRequest {
            fields: CreatePackageRequest {
                name: "Starter".to_string(),
                price: 9.99,
                discount: 0.0,
                giveaway_entries: 3,
                summary: None,
            },
            is_active: Some(true),
            position: None,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "name": "Starter",
                "price": 9.99,
                "discount": 0.0,
                "giveawayEntries": 3,
                "isActive": true
            })
        );
    }

    #[test]
    fn package_query_renders_bools() {
        let query = PackageQuery { is_active: Some(false), ..PackageQuery::default() };
        assert_eq!(query.to_query_pairs(), vec![("isActive".to_string(), "false".to_string())]);
    }
}
