//! Resource command sets: paths, query strings, bodies and notification flags.

mod support;

use memberdesk_common::MemoryCredentialStore;
use memberdesk_domain::{
    CreateTierRequest, DiscountType, PackageQuery, ReorderTiersRequest, SortOrder,
    SwitchPackagesRequest, TierQuery, TierType,
};
use memberdesk_infra::{PackageCommands, ProfileCommands, TierCommands};
use serde_json::{json, Value};
use support::TestClient;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREATED_AT: &str = "2025-01-10T08:00:00Z";

fn tier_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Gold",
        "discountType": "PERCENT",
        "originalPrice": 49.99,
        "discountAmount": 10,
        "isRecommended": true,
        "isActive": true,
        "position": 1,
        "tierType": "MONTHLY",
        "summary": "Best value",
        "benefits": ["Priority draws"],
        "monthlyEntries": 20,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT
    })
}

fn package_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Starter",
        "price": 9.99,
        "discount": 0,
        "isActive": true,
        "position": 1,
        "giveawayEntries": 5,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT
    })
}

fn client(server: &MockServer) -> TestClient {
    TestClient::new(server, MemoryCredentialStore::with_tokens("T1", "R1"))
}

#[tokio::test]
async fn tier_list_sends_only_set_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/tiers"))
        .and(query_param("tierType", "YEARLY"))
        .and(query_param("take", "20"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Tiers fetched",
            "data": {
                "data": [tier_json("t-1")],
                "meta": { "total": 1, "taken": 1, "remaining": 0 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let t = client(&server);
    let query = TierQuery {
        tier_type: Some(TierType::Yearly),
        take: Some(20),
        order: Some(SortOrder::Desc),
        ..TierQuery::default()
    };
    let page = TierCommands::new(t.client.clone()).list(&query).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.total, 1);
    assert!(t.notifier.is_empty(), "listing is silent");

    let requests = server.received_requests().await.unwrap();
    let query_string = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query_string.contains("skip"));
    assert!(!query_string.contains("search"));
}

#[tokio::test]
async fn active_tiers_filter_by_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/tiers/active"))
        .and(query_param("tierType", "MONTHLY"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "data": [tier_json("t-1"), tier_json("t-2")] } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let t = client(&server);
    let active = TierCommands::new(t.client.clone()).active(TierType::Monthly).await.unwrap();
    assert_eq!(active.data.len(), 2);
}

#[tokio::test]
async fn tier_create_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/tier"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "message": "Tier created", "data": tier_json("t-9") })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let t = client(&server);
    let payload = CreateTierRequest {
        name: "Gold".to_string(),
        discount_type: DiscountType::Percent,
        original_price: 49.99,
        discount_amount: 10.0,
        tier_type: TierType::Monthly,
        summary: "Best value".to_string(),
        benefits: vec!["Priority draws".to_string()],
        monthly_entries: 20,
    };
    let tier = TierCommands::new(t.client.clone()).create(&payload).await.unwrap();

    assert_eq!(tier.id, "t-9");
    assert_eq!(t.notifier.successes(), vec!["Tier created"]);
}

#[tokio::test]
async fn tier_state_changes_put_empty_bodies_silently() {
    let server = MockServer::start().await;
    for route in ["/admin/tier/t-1/deactivate", "/admin/tier/t-1/set-recommended"] {
        Mock::given(method("PUT"))
            .and(path(route))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Done" })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let t = client(&server);
    let tiers = TierCommands::new(t.client.clone());
    tiers.deactivate("t-1").await.unwrap();
    tiers.set_recommended("t-1").await.unwrap();

    assert!(t.notifier.is_empty());
}

#[tokio::test]
async fn tier_reorder_sends_both_ids() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/tiers/switch"))
        .and(body_json(json!({
            "firstTierId": "t-1",
            "secondTierId": "t-2",
            "tierType": "MONTHLY"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Swapped" })))
        .expect(1)
        .mount(&server)
        .await;

    let t = client(&server);
    let payload = ReorderTiersRequest {
        first_tier_id: "t-1".to_string(),
        second_tier_id: "t-2".to_string(),
        tier_type: TierType::Monthly,
    };
    TierCommands::new(t.client.clone()).reorder(&payload).await.unwrap();

    assert_eq!(t.notifier.successes(), vec!["Swapped"]);
}

#[tokio::test]
async fn tier_delete_business_failure_surfaces_code() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/tier/t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "message": "Tier is in use", "error_code": "TIER_IN_USE" }),
        ))
        .mount(&server)
        .await;

    let t = client(&server);
    let err = TierCommands::new(t.client.clone()).delete("t-1").await.unwrap_err();

    assert_eq!(err.error_code(), Some("TIER_IN_USE"));
    assert_eq!(t.notifier.errors(), vec!["Tier is in use"]);
}

#[tokio::test]
async fn package_commands_are_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/package"))
        .and(query_param("isActive", "true"))
        .and(query_param("search", "start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Packages fetched",
            "data": { "data": [package_json("p-1")], "meta": { "total": 1, "taken": 1, "remaining": 0 } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/package/p-1/recommend"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Recommended" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/package/switch-positions"))
        .and(body_json(json!({ "firstPackageId": "p-1", "secondPackageId": "p-2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Switched" })))
        .expect(1)
        .mount(&server)
        .await;

    let t = client(&server);
    let packages = PackageCommands::new(t.client.clone());

    let query = PackageQuery {
        is_active: Some(true),
        search: Some("start".to_string()),
        ..PackageQuery::default()
    };
    let page = packages.list(&query).await.unwrap();
    assert_eq!(page.data[0].giveaway_entries, 5);

    packages.recommend("p-1").await.unwrap();
    packages
        .switch_positions(&SwitchPackagesRequest {
            first_package_id: "p-1".to_string(),
            second_package_id: "p-2".to_string(),
        })
        .await
        .unwrap();

    assert!(t.notifier.is_empty());
}

#[tokio::test]
async fn active_packages_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/package/active"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "data": [package_json("p-1")] } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let t = client(&server);
    let active = PackageCommands::new(t.client.clone()).active().await.unwrap();
    assert_eq!(active.data[0].id, "p-1");
}

#[tokio::test]
async fn profile_me_decodes_admin_and_shows_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/profile/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Profile fetched",
            "data": {
                "id": "a-1",
                "email": "admin@example.com",
                "firstName": "Ada",
                "lastName": "Admin",
                "role": "SUPER_ADMIN",
                "status": "ACTIVE",
                "createdAt": CREATED_AT,
                "updatedAt": CREATED_AT
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let t = client(&server);
    let profile = ProfileCommands::new(t.client.clone()).me().await.unwrap();

    assert_eq!(profile.full_name(), "Ada Admin");
    assert_eq!(t.notifier.successes(), vec!["Profile fetched"]);
}
