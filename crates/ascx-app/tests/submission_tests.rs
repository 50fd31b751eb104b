// Rust guideline compliant 2026-10-12

//! End-to-end submission readiness runs against a scripted API.

mod common;

use ascx_app::{
    ensure_submission_ready, resolve_version_id, validate_submission, Severity, VersionSelector,
    VersionTarget,
};
use ascx_core::RequestContext;
use common::{client, Reply, ScriptedTransport};
use std::sync::Arc;

fn target() -> VersionTarget {
    VersionTarget {
        app_id: "app-1".to_string(),
        version_id: "ver-1".to_string(),
        platform: "IOS".to_string(),
    }
}

/// Scripts a version that passes every check.
fn script_ready_version(transport: &Arc<ScriptedTransport>) {
    transport.on_json(
        "/v1/appStoreVersions/ver-1",
        r#"{"data":{"type":"appStoreVersions","id":"ver-1","attributes":{"versionString":"1.0","appVersionState":"PREPARE_FOR_SUBMISSION"}}}"#,
    );
    transport.on_json(
        "/v1/appStoreVersions/ver-1/build",
        r#"{"data":{"type":"builds","id":"build-1","attributes":{"version":"7"}}}"#,
    );
    transport.on_json(
        "/v1/appStoreVersions/ver-1/appStoreVersionLocalizations",
        r#"{"data":[{"type":"appStoreVersionLocalizations","id":"loc-1","attributes":{"locale":"en-US","description":"A demo app","keywords":"demo,app"}}],"links":{}}"#,
    );
    transport.on_json(
        "/v1/appStoreVersionLocalizations/loc-1/appScreenshotSets",
        r#"{"data":[{"type":"appScreenshotSets","id":"set-1","attributes":{"screenshotDisplayType":"APP_IPHONE_67"}}],"links":{}}"#,
    );
    transport.on_json(
        "/v1/appScreenshotSets/set-1/appScreenshots",
        r#"{"data":[{"type":"appScreenshots","id":"shot-1","attributes":{"fileName":"home.png"}}],"links":{}}"#,
    );
    transport.on_json(
        "/v1/apps/app-1/appInfos",
        r#"{"data":[{"type":"appInfos","id":"info-1"}],"links":{}}"#,
    );
    transport.on_json(
        "/v1/appInfos/info-1/appInfoLocalizations",
        r#"{"data":[{"type":"appInfoLocalizations","id":"il-1","attributes":{"locale":"en-US","name":"Demo","privacyPolicyUrl":"https://example.com/privacy"}}],"links":{}}"#,
    );
    transport.on_json(
        "/v1/appStoreVersions/ver-1/ageRatingDeclaration",
        r#"{"data":{"type":"ageRatingDeclarations","id":"age-1","attributes":{"violenceCartoonOrFantasy":"NONE"}}}"#,
    );
}

#[test]
fn test_complete_version_is_ready() {
    let transport = ScriptedTransport::new();
    script_ready_version(&transport);
    let client = client(&transport);

    let report = validate_submission(&client, &RequestContext::background(), target());

    assert!(report.ready, "unexpected issues: {:?}", report.issues);
    assert_eq!(report.error_count, 0);
    assert_eq!(report.warning_count, 0);
    assert!(ensure_submission_ready(&report).is_ok());
}

#[test]
fn test_missing_build_empty_description_and_no_screenshots_block() {
    let transport = ScriptedTransport::new();
    transport.on("/v1/appStoreVersions/ver-1/build", Reply::NotFound);
    transport.on_json(
        "/v1/appStoreVersions/ver-1/appStoreVersionLocalizations",
        r#"{"data":[{"type":"appStoreVersionLocalizations","id":"loc-1","attributes":{"locale":"en-US","description":"  ","keywords":"demo"}}],"links":{}}"#,
    );
    transport.on_json(
        "/v1/appStoreVersionLocalizations/loc-1/appScreenshotSets",
        r#"{"data":[],"links":{}}"#,
    );
    script_ready_version(&transport);
    let client = client(&transport);

    let report = validate_submission(&client, &RequestContext::background(), target());

    assert!(!report.ready);
    assert!(report.error_count >= 3);
    let errors: Vec<_> = report
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .map(|issue| (issue.check.as_str(), issue.message.as_str()))
        .collect();
    assert_eq!(
        errors,
        vec![
            ("build", "no build attached to this version"),
            ("description", "locale en-US: description is empty"),
            ("screenshots", "locale en-US: no screenshot sets found"),
        ]
    );
    let err = ensure_submission_ready(&report).unwrap_err();
    assert_eq!(err.to_string(), "submit validate: 3 error(s) found");
}

#[test]
fn test_null_description_is_reported_as_empty() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        "/v1/appStoreVersions/ver-1/appStoreVersionLocalizations",
        r#"{"data":[{"type":"appStoreVersionLocalizations","id":"loc-1","attributes":{"locale":"en-US","description":null,"keywords":"a","whatsNew":null}}],"links":{"next":null}}"#,
    );
    script_ready_version(&transport);
    let client = client(&transport);

    let report = validate_submission(&client, &RequestContext::background(), target());

    assert!(!report.ready);
    assert_eq!(report.error_count, 1);
    let issue = &report.issues[0];
    assert_eq!(issue.check, "description");
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.message, "locale en-US: description is empty");
}

#[test]
fn test_unreachable_sub_resources_degrade_to_warnings() {
    let transport = ScriptedTransport::new();
    transport.on("/v1/appStoreVersions/ver-1/build", Reply::Status(503));
    transport.on("/v1/appScreenshotSets/set-1/appScreenshots", Reply::Fail("reset".to_string()));
    transport.on("/v1/apps/app-1/appInfos", Reply::Status(500));
    transport.on(
        "/v1/appStoreVersions/ver-1/ageRatingDeclaration",
        Reply::Status(502),
    );
    script_ready_version(&transport);
    let client = client(&transport);

    let report = validate_submission(&client, &RequestContext::background(), target());

    assert!(report.ready);
    assert_eq!(report.error_count, 0);
    let checks: Vec<_> = report.issues.iter().map(|issue| issue.check.as_str()).collect();
    assert_eq!(checks, vec!["build", "screenshots", "app_info", "age_rating"]);
    assert!(report
        .issues
        .iter()
        .all(|issue| issue.severity == Severity::Warning));
    assert_eq!(
        report.issues[1].message,
        "locale en-US (APP_IPHONE_67): unable to check: transport error: reset"
    );
}

#[test]
fn test_version_fetch_failure_stops_the_run() {
    let transport = ScriptedTransport::new();
    transport.on("/v1/appStoreVersions/ver-1", Reply::NotFound);
    let client = client(&transport);

    let report = validate_submission(&client, &RequestContext::background(), target());

    assert!(!report.ready);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].check, "version");
    assert!(report.issues[0].message.starts_with("failed to fetch version: "));
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn test_non_editable_state_is_an_error_but_checks_continue() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        "/v1/appStoreVersions/ver-1",
        r#"{"data":{"type":"appStoreVersions","id":"ver-1","attributes":{"appStoreState":"READY_FOR_SALE"}}}"#,
    );
    script_ready_version(&transport);
    let client = client(&transport);

    let report = validate_submission(&client, &RequestContext::background(), target());

    assert_eq!(report.error_count, 1);
    assert_eq!(report.issues[0].check, "version_state");
    assert_eq!(
        report.issues[0].message,
        "version is in non-editable state: READY_FOR_SALE"
    );
    assert!(transport
        .requests()
        .iter()
        .any(|url| url.ends_with("/ageRatingDeclaration")));
}

#[test]
fn test_empty_app_info_localizations_and_blank_fields() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        "/v1/appInfos/info-1/appInfoLocalizations",
        r#"{"data":[{"type":"appInfoLocalizations","id":"il-1","attributes":{"locale":"fr-FR","name":""}}],"links":{}}"#,
    );
    script_ready_version(&transport);
    let client = client(&transport);

    let report = validate_submission(&client, &RequestContext::background(), target());

    let found: Vec<_> = report
        .issues
        .iter()
        .map(|issue| (issue.check.as_str(), issue.severity))
        .collect();
    assert_eq!(
        found,
        vec![("name", Severity::Error), ("privacy_policy_url", Severity::Warning)]
    );
}

#[test]
fn test_version_string_resolves_through_filtered_listing() {
    let transport = ScriptedTransport::new();
    transport.on_json(
        "/v1/apps/app-1/appStoreVersions",
        r#"{"data":[{"type":"appStoreVersions","id":"ver-9","attributes":{"versionString":"2.0"}}],"links":{}}"#,
    );
    let client = client(&transport);
    let ctx = RequestContext::background();

    let selector = VersionSelector::VersionString("2.0".to_string());
    let id = resolve_version_id(&client, &ctx, "app-1", &selector, "IOS").unwrap();
    assert_eq!(id, "ver-9");
    let request = &transport.requests()[0];
    assert!(request.contains("filter%5BversionString%5D=2.0"));
    assert!(request.contains("filter%5Bplatform%5D=IOS"));
}

#[test]
fn test_unknown_version_string_is_not_found() {
    let transport = ScriptedTransport::new();
    transport.on_json("/v1/apps/app-1/appStoreVersions", r#"{"data":[],"links":{}}"#);
    let client = client(&transport);

    let selector = VersionSelector::VersionString("9.9".to_string());
    let err = resolve_version_id(&client, &RequestContext::background(), "app-1", &selector, "IOS")
        .unwrap_err();
    assert!(err.to_string().starts_with("submit validate: not found: "));
}
