//! Integration tests for the admin API wire contract

use memberdesk_domain::{
    ActiveList, Config, CredentialPair, LoginResponse, Package, Paginated, PricingTier,
    QueryPairs, ResponseEnvelope, SortOrder, StorageBackend, TierQuery, TierType,
};
use serde_json::json;

fn tier_json(id: &str, position: i32) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Tier {id}"),
        "discountType": "PERCENT",
        "originalPrice": 100,
        "discountAmount": 10,
        "isRecommended": position == 1,
        "isActive": true,
        "position": position,
        "tierType": "MONTHLY",
        "summary": "",
        "benefits": [],
        "monthlyEntries": 10,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

#[test]
fn paginated_tiers_decode_from_envelope_data() {
    let body = json!({
        "message": "Tiers fetched",
        "data": {
            "data": [tier_json("a", 1), tier_json("b", 2)],
            "meta": { "total": 12, "taken": 2, "remaining": 10 }
        }
    });
    let envelope = ResponseEnvelope::from_slice(body.to_string().as_bytes()).unwrap();

    assert!(envelope.business_error_code().is_none());
    let page: Paginated<PricingTier> = envelope.data_as().unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.remaining, 10);
    assert!(page.data[0].is_recommended);
}

#[test]
fn active_packages_decode_without_position() {
    let body = json!({
        "data": {
            "data": [{
                "id": "p1",
                "name": "Starter",
                "price": 9.99,
                "discount": 0,
                "isActive": true,
                "giveawayEntries": 3,
                "createdAt": "2024-05-01T10:00:00Z",
                "updatedAt": "2024-05-01T10:00:00Z"
            }]
        }
    });
    let envelope = ResponseEnvelope::from_slice(body.to_string().as_bytes()).unwrap();
    let list: ActiveList<Package> = envelope.data_as().unwrap();

    assert_eq!(list.data[0].position, None);
    assert_eq!(list.data[0].summary, None);
}

#[test]
fn login_body_yields_credential_pair() {
    let envelope = ResponseEnvelope::from_slice(
        br#"{"message":"Login successful","accessToken":"T1","refreshToken":"R1","user":{}}"#,
    )
    .unwrap();
    let login: LoginResponse = envelope.body_as().unwrap();

    assert_eq!(login.credentials(), CredentialPair::new("T1", Some("R1".to_string())));
}

#[test]
fn tier_query_matches_listing_url_shape() {
    let query = TierQuery {
        tier_type: Some(TierType::Yearly),
        search: Some("gold".to_string()),
        order: Some(SortOrder::Desc),
        ..TierQuery::default()
    };
    let rendered: Vec<String> =
        query.to_query_pairs().into_iter().map(|(k, v)| format!("{k}={v}")).collect();

    assert_eq!(rendered.join("&"), "tierType=YEARLY&search=gold&order=desc");
}

#[test]
fn toml_config_round_trips_through_serde() {
    let config: Config = toml::from_str(
        r#"
        [api]
        base_url = "https://admin.example.com"
        single_flight_refresh = false

        [storage]
        backend = "memory"
        "#,
    )
    .unwrap();

    assert!(!config.api.single_flight_refresh);
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.session.login_route, "/login");
}
