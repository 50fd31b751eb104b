// Rust guideline compliant 2026-10-12

//! Integration tests for the typed client.

mod common;

use ascx_core::{Client, Error, RequestContext};
use common::{client, Reply, ScriptedTransport};

#[test]
fn test_endpoint_encodes_ids_as_single_segments() {
    let transport = ScriptedTransport::new();
    let client = client(&transport);

    let url = client.endpoint(&["v1", "apps", "a/b?c"], &[]).unwrap();
    assert_eq!(url.path(), "/v1/apps/a%2Fb%3Fc");
    assert!(url.query().is_none());
}

#[test]
fn test_get_app_decodes_attributes() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        "/v1/apps/app-1",
        r#"{"data":{"type":"apps","id":"app-1","attributes":{"name":"Demo","bundleId":"com.example.demo"}}}"#,
    );
    let client = client(&transport);

    let app = client.get_app(&RequestContext::background(), "app-1").unwrap();
    assert_eq!(app.data.attributes.name, "Demo");
    assert_eq!(app.data.attributes.bundle_id, "com.example.demo");
}

#[test]
fn test_not_found_is_distinguished() {
    let transport = ScriptedTransport::new();
    transport.on("/v1/appStoreVersions/ver-1/build", Reply::NotFound);
    transport.on("/v1/appStoreVersions/ver-2/build", Reply::Status(503));
    let client = client(&transport);
    let ctx = RequestContext::background();

    let missing = client.get_app_store_version_build(&ctx, "ver-1").unwrap_err();
    assert!(missing.is_not_found());
    let other = client.get_app_store_version_build(&ctx, "ver-2").unwrap_err();
    assert!(!other.is_not_found());
}

#[test]
fn test_recent_builds_reads_only_first_page() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        "/v1/builds",
        r#"{"data":[{"type":"builds","id":"b-2"},{"type":"builds","id":"b-1"}],
            "links":{"next":"https://api.appstoreconnect.apple.com/v1/builds?cursor=AQ"}}"#,
    );
    let client = client(&transport);

    let builds = client
        .recent_builds(&RequestContext::background(), "app-1", 50)
        .unwrap();
    assert_eq!(builds.len(), 2);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("sort=-uploadedDate"));
    assert!(requests[0].contains("limit=50"));
}

#[test]
fn test_invalid_base_url_is_config_error() {
    let transport = ScriptedTransport::new();
    let result = Client::new(transport, "not a url");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_json_is_decode_error() {
    let transport = ScriptedTransport::new();
    transport.on_json("/v1/apps/app-1", "{not json");
    let client = client(&transport);

    let result = client.get_app(&RequestContext::background(), "app-1");
    assert!(matches!(result, Err(Error::Json(_))));
}
