// Rust guideline compliant 2026-10-12

//! In-app purchase and subscription readiness against a scripted API.

mod common;

use ascx_app::{
    ensure_catalog_ready, fetch_in_app_purchases, fetch_subscriptions, validate_catalog,
    CatalogKind,
};
use ascx_core::RequestContext;
use common::{client, Reply, ScriptedTransport};

const IAP_FIRST: &str =
    "https://api.appstoreconnect.apple.com/v1/apps/app-1/inAppPurchasesV2?limit=200";
const IAP_SECOND: &str =
    "https://api.appstoreconnect.apple.com/v1/apps/app-1/inAppPurchasesV2?cursor=AQ&limit=200";

#[test]
fn test_iap_fetch_follows_every_page() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        IAP_FIRST,
        &format!(
            r#"{{"data":[{{"type":"inAppPurchases","id":"iap-1","attributes":{{"productId":"gold","state":"APPROVED"}}}}],"links":{{"next":"{}"}}}}"#,
            IAP_SECOND
        ),
    );
    transport.on_json(
        IAP_SECOND,
        r#"{"data":[{"type":"inAppPurchases","id":"iap-2","attributes":{"productId":"silver","state":"MISSING_METADATA"}}],"links":{"next":""}}"#,
    );
    let client = client(&transport);

    let items = fetch_in_app_purchases(&client, &RequestContext::background(), "app-1").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(transport.requests(), vec![IAP_FIRST, IAP_SECOND]);

    let report = validate_catalog("app-1", CatalogKind::InAppPurchases, &items, false);
    assert!(report.ready);
    assert_eq!(report.warning_count, 1);

    let strict = validate_catalog("app-1", CatalogKind::InAppPurchases, &items, true);
    let err = ensure_catalog_ready(&strict).unwrap_err();
    assert_eq!(err.to_string(), "validate iap: found 1 blocking issue(s)");
}

#[test]
fn test_iap_fetch_failure_is_named() {
    let transport = ScriptedTransport::new();
    transport.on("/v1/apps/app-1/inAppPurchasesV2", Reply::Status(500));
    let client = client(&transport);

    let err = fetch_in_app_purchases(&client, &RequestContext::background(), "app-1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "validate iap: failed to fetch in-app purchases: API error (500): scripted failure"
    );
}

#[test]
fn test_subscriptions_are_collected_per_group_and_blank_groups_skipped() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        "/v1/apps/app-1/subscriptionGroups",
        r#"{"data":[{"type":"subscriptionGroups","id":"grp-1"},{"type":"subscriptionGroups","id":"  "},{"type":"subscriptionGroups","id":"grp-2"}],"links":{}}"#,
    );
    transport.on_json(
        "/v1/subscriptionGroups/grp-1/subscriptions",
        r#"{"data":[{"type":"subscriptions","id":"sub-1","attributes":{"productId":"monthly","state":"READY_TO_SUBMIT"}}],"links":{}}"#,
    );
    transport.on_json(
        "/v1/subscriptionGroups/grp-2/subscriptions",
        r#"{"data":[{"type":"subscriptions","id":"sub-2","attributes":{"productId":"yearly","state":"APPROVED"}}],"links":{}}"#,
    );
    let client = client(&transport);

    let items = fetch_subscriptions(&client, &RequestContext::background(), "app-1").unwrap();
    let groups: Vec<_> = items.iter().map(|item| item.group_id.as_deref()).collect();
    assert_eq!(groups, vec![Some("grp-1"), Some("grp-2")]);
    assert_eq!(transport.requests().len(), 3);

    let report = validate_catalog("app-1", CatalogKind::Subscriptions, &items, false);
    assert_eq!(
        report.issues[0].message,
        "product monthly: not yet submitted (state READY_TO_SUBMIT)"
    );
}

#[test]
fn test_subscription_group_failure_names_group() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        "/v1/apps/app-1/subscriptionGroups",
        r#"{"data":[{"type":"subscriptionGroups","id":"grp-1"}],"links":{}}"#,
    );
    transport.on("/v1/subscriptionGroups/grp-1/subscriptions", Reply::NotFound);
    let client = client(&transport);

    let err = fetch_subscriptions(&client, &RequestContext::background(), "app-1").unwrap_err();
    assert!(err
        .to_string()
        .starts_with("validate subscriptions: failed to fetch subscriptions for group grp-1: "));
}
