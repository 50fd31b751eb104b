// Rust guideline compliant 2026-10-12

//! Release pipeline dashboard for one app.
//!
//! The snapshot has one required part (the app identity) and up to seven
//! optional sections. Sections are fetched by three independent tasks, each of
//! which returns only the fields it owns; the snapshot is assembled after all
//! tasks succeed, so a failed run never yields a partial snapshot.

use crate::error::{AppError, Result};
use crate::sections::{run_sections, SectionTask, DEFAULT_SECTION_CONCURRENCY};
use ascx_core::client::RECENT_BUILDS_LIMIT;
use ascx_core::models::{BuildAttributes, Resource};
use ascx_core::{select_latest, Client, RequestContext};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Section names accepted by `--include`, in display order.
pub const ALLOWED_SECTIONS: [&str; 7] = [
    "builds",
    "testflight",
    "appstore",
    "submission",
    "review",
    "phased-release",
    "links",
];

const DISTRIBUTED_BUILD_STATES: [&str; 2] = ["IN_BETA_TESTING", "READY_FOR_TESTING"];

const IN_FLIGHT_SUBMISSION_STATES: [&str; 5] = [
    "READY_FOR_REVIEW",
    "WAITING_FOR_REVIEW",
    "IN_REVIEW",
    "UNRESOLVED_ISSUES",
    "CANCELING",
];

const UNRESOLVED_ISSUES: &str = "UNRESOLVED_ISSUES";

const WEB_BASE_URL: &str = "https://appstoreconnect.apple.com/apps";

/// Which optional sections to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncludeSet {
    pub builds: bool,
    pub testflight: bool,
    pub appstore: bool,
    pub submission: bool,
    pub review: bool,
    pub phased_release: bool,
    pub links: bool,
}

impl IncludeSet {
    /// Returns a set with every section enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            builds: true,
            testflight: true,
            appstore: true,
            submission: true,
            review: true,
            phased_release: true,
            links: true,
        }
    }
}

/// Parses a comma-separated `--include` value.
///
/// Matching is case-insensitive and ignores surrounding whitespace and empty
/// items. An empty value selects every section.
///
/// # Errors
///
/// Returns `AppError::Usage` naming the first unsupported section.
pub fn parse_include(value: &str) -> Result<IncludeSet> {
    let lowered = value.trim().to_lowercase();
    let parts: Vec<&str> = lowered
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return Ok(IncludeSet::all());
    }

    let mut includes = IncludeSet::default();
    for part in parts {
        match part {
            "builds" => includes.builds = true,
            "testflight" => includes.testflight = true,
            "appstore" => includes.appstore = true,
            "submission" => includes.submission = true,
            "review" => includes.review = true,
            "phased-release" => includes.phased_release = true,
            "links" => includes.links = true,
            other => {
                return Err(AppError::Usage(format!(
                    "--include contains unsupported section {:?} (allowed: {})",
                    other,
                    ALLOWED_SECTIONS.join(",")
                )))
            }
        }
    }
    Ok(includes)
}

/// App identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSummary {
    pub id: String,
    pub bundle_id: String,
    pub name: String,
}

/// Newest uploaded build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBuild {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub build_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub processing_state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uploaded_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestBuild>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFlightSection {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub latest_distributed_build_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub beta_review_state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub external_build_state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub submitted_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreSection {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub platform: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSection {
    pub in_flight: bool,
    pub blocking_issues: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSection {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub latest_submission_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub submitted_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasedReleaseSection {
    pub configured: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_date: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub current_day_number: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub total_pause_duration: i64,
}

/// App Store Connect web pages for the app.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksSection {
    pub app_store_connect: String,
    pub test_flight: String,
    pub review: String,
}

impl LinksSection {
    /// Builds the links for an app ID.
    #[must_use]
    pub fn for_app(app_id: &str) -> Self {
        Self {
            app_store_connect: format!("{}/{}", WEB_BASE_URL, app_id),
            test_flight: format!("{}/{}/testflight/ios", WEB_BASE_URL, app_id),
            review: format!("{}/{}/appstore/review", WEB_BASE_URL, app_id),
        }
    }
}

/// Composite dashboard document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub app: AppSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builds: Option<BuildsSection>,
    #[serde(rename = "testflight", skip_serializing_if = "Option::is_none")]
    pub testflight: Option<TestFlightSection>,
    #[serde(rename = "appstore", skip_serializing_if = "Option::is_none")]
    pub appstore: Option<AppStoreSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phased_release: Option<PhasedReleaseSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<LinksSection>,
}

/// Fields produced by one section task.
enum SectionOutput {
    Builds {
        builds: Option<BuildsSection>,
        testflight: Option<TestFlightSection>,
    },
    AppStore {
        appstore: Option<AppStoreSection>,
        phased_release: Option<PhasedReleaseSection>,
    },
    Submissions {
        submission: Option<SubmissionSection>,
        review: Option<ReviewSection>,
    },
}

/// Collects the dashboard snapshot for an app.
///
/// The app record is fetched first; then the requested sections are fetched by
/// up to three tasks running concurrently.
///
/// # Arguments
///
/// * `client` - API client
/// * `ctx` - Request context shared by every request
/// * `app_id` - App to report on
/// * `includes` - Optional sections to build
///
/// # Errors
///
/// Returns an error prefixed with `status` if the app cannot be fetched or any
/// section task fails. No snapshot is returned in that case.
pub fn collect_dashboard(
    client: &Client,
    ctx: &RequestContext,
    app_id: &str,
    includes: IncludeSet,
) -> Result<DashboardSnapshot> {
    collect(client, ctx, app_id, includes).map_err(|e| e.in_command("status"))
}

fn collect(
    client: &Client,
    ctx: &RequestContext,
    app_id: &str,
    includes: IncludeSet,
) -> Result<DashboardSnapshot> {
    let app = client.get_app(ctx, app_id)?.data;
    let mut snapshot = DashboardSnapshot {
        app: AppSummary {
            id: app.id,
            bundle_id: app.attributes.bundle_id,
            name: app.attributes.name,
        },
        ..DashboardSnapshot::default()
    };
    if includes.links {
        snapshot.links = Some(LinksSection::for_app(app_id));
    }

    let mut tasks = Vec::new();
    if includes.builds || includes.testflight {
        tasks.push(SectionTask::new("builds/testflight", move || {
            builds_and_testflight(client, ctx, app_id, includes)
        }));
    }
    if includes.appstore || includes.phased_release {
        tasks.push(SectionTask::new("appstore/phased-release", move || {
            appstore_and_phased_release(client, ctx, app_id, includes)
        }));
    }
    if includes.submission || includes.review {
        tasks.push(SectionTask::new("submission/review", move || {
            submission_and_review(client, ctx, app_id, includes)
        }));
    }
    info!(app_id, tasks = tasks.len(), "collecting dashboard");

    for output in run_sections(tasks, DEFAULT_SECTION_CONCURRENCY)? {
        match output {
            SectionOutput::Builds { builds, testflight } => {
                snapshot.builds = builds;
                snapshot.testflight = testflight;
            }
            SectionOutput::AppStore {
                appstore,
                phased_release,
            } => {
                snapshot.appstore = appstore;
                snapshot.phased_release = phased_release;
            }
            SectionOutput::Submissions { submission, review } => {
                snapshot.submission = submission;
                snapshot.review = review;
            }
        }
    }
    Ok(snapshot)
}

fn builds_and_testflight(
    client: &Client,
    ctx: &RequestContext,
    app_id: &str,
    includes: IncludeSet,
) -> Result<SectionOutput> {
    let builds = client.recent_builds(ctx, app_id, RECENT_BUILDS_LIMIT)?;

    let builds_section = if includes.builds {
        let latest = match builds.first() {
            Some(build) => Some(latest_build(client, ctx, build)?),
            None => None,
        };
        Some(BuildsSection { latest })
    } else {
        None
    };

    let testflight = if includes.testflight {
        Some(testflight_section(client, ctx, &builds)?)
    } else {
        None
    };

    Ok(SectionOutput::Builds {
        builds: builds_section,
        testflight,
    })
}

fn latest_build(
    client: &Client,
    ctx: &RequestContext,
    build: &Resource<BuildAttributes>,
) -> Result<LatestBuild> {
    let mut entry = LatestBuild {
        id: build.id.clone(),
        build_number: build.attributes.version.clone(),
        processing_state: build.attributes.processing_state.clone(),
        uploaded_date: build.attributes.uploaded_date.clone(),
        ..LatestBuild::default()
    };
    match client.get_build_pre_release_version(ctx, &build.id) {
        Ok(doc) => {
            entry.version = doc.data.attributes.version;
            entry.platform = doc.data.attributes.platform;
        }
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err.into()),
    }
    Ok(entry)
}

fn testflight_section(
    client: &Client,
    ctx: &RequestContext,
    builds: &[Resource<BuildAttributes>],
) -> Result<TestFlightSection> {
    let mut section = TestFlightSection::default();
    if builds.is_empty() {
        return Ok(section);
    }
    let build_ids: Vec<String> = builds.iter().map(|build| build.id.clone()).collect();

    let details = client.list_build_beta_details(ctx, &build_ids)?;
    let mut external_state = HashMap::with_capacity(details.len());
    for detail in &details {
        let build_id = detail.relationship_id("build")?;
        external_state.insert(build_id, detail.attributes.external_build_state.trim().to_string());
    }

    // Builds are newest first, so the first distributed one is the latest.
    for build in builds {
        let state = external_state
            .get(&build.id)
            .map(|state| state.to_uppercase())
            .unwrap_or_default();
        if DISTRIBUTED_BUILD_STATES.contains(&state.as_str()) {
            section.latest_distributed_build_id = build.id.clone();
            section.external_build_state = state;
            break;
        }
    }

    let submissions = client.list_beta_app_review_submissions(ctx, &build_ids)?;
    if let Some(latest) = select_latest(&submissions) {
        section.beta_review_state = latest.attributes.beta_review_state.clone();
        section.submitted_date = latest.attributes.submitted_date.clone();
    }
    Ok(section)
}

fn appstore_and_phased_release(
    client: &Client,
    ctx: &RequestContext,
    app_id: &str,
    includes: IncludeSet,
) -> Result<SectionOutput> {
    let versions = client.list_app_store_versions(ctx, app_id)?;
    let latest = select_latest(&versions);

    let appstore = includes.appstore.then(|| match latest {
        Some(version) => AppStoreSection {
            version_id: version.id.clone(),
            version: version.attributes.version_string.clone(),
            state: version.attributes.resolved_state().to_string(),
            platform: version.attributes.platform.clone(),
            created_date: version.attributes.created_date.clone(),
        },
        None => AppStoreSection::default(),
    });

    let phased_release = if includes.phased_release {
        let mut section = PhasedReleaseSection::default();
        if let Some(version) = latest {
            match client.get_phased_release(ctx, &version.id) {
                Ok(doc) => {
                    let attrs = doc.data.attributes;
                    section = PhasedReleaseSection {
                        configured: true,
                        id: doc.data.id,
                        state: attrs.phased_release_state,
                        start_date: attrs.start_date,
                        current_day_number: attrs.current_day_number,
                        total_pause_duration: attrs.total_pause_duration,
                    };
                }
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err.into()),
            }
        }
        Some(section)
    } else {
        None
    };

    Ok(SectionOutput::AppStore {
        appstore,
        phased_release,
    })
}

fn submission_and_review(
    client: &Client,
    ctx: &RequestContext,
    app_id: &str,
    includes: IncludeSet,
) -> Result<SectionOutput> {
    let submissions = client.list_review_submissions(ctx, app_id)?;

    let submission = includes.submission.then(|| {
        let mut section = SubmissionSection::default();
        for item in &submissions {
            let state = item.attributes.submission_state.trim().to_uppercase();
            if IN_FLIGHT_SUBMISSION_STATES.contains(&state.as_str()) {
                section.in_flight = true;
            }
            if state == UNRESOLVED_ISSUES {
                section
                    .blocking_issues
                    .push(format!("submission {} has unresolved issues", item.id));
            }
        }
        section.blocking_issues.sort();
        section
    });

    let review = includes.review.then(|| match select_latest(&submissions) {
        Some(latest) => ReviewSection {
            latest_submission_id: latest.id.clone(),
            state: latest.attributes.submission_state.clone(),
            submitted_date: latest.attributes.submitted_date.clone(),
            platform: latest.attributes.platform.clone(),
        },
        None => ReviewSection::default(),
    });

    Ok(SectionOutput::Submissions { submission, review })
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_include_empty_selects_all() {
        assert_eq!(parse_include("").unwrap(), IncludeSet::all());
        assert_eq!(parse_include("  , ").unwrap(), IncludeSet::all());
    }

    #[test]
    fn test_parse_include_subset_is_case_insensitive() {
        let includes = parse_include(" Builds, PHASED-RELEASE ,links").unwrap();
        assert!(includes.builds);
        assert!(includes.phased_release);
        assert!(includes.links);
        assert!(!includes.testflight);
        assert!(!includes.review);
    }

    #[test]
    fn test_parse_include_rejects_unknown_section() {
        let err = parse_include("builds,metrics").unwrap_err();
        assert!(err.is_usage());
        assert_eq!(
            err.to_string(),
            "--include contains unsupported section \"metrics\" (allowed: \
             builds,testflight,appstore,submission,review,phased-release,links)"
        );
    }

    #[test]
    fn test_links_point_at_web_pages() {
        let links = LinksSection::for_app("123");
        assert_eq!(links.app_store_connect, "https://appstoreconnect.apple.com/apps/123");
        assert_eq!(
            links.test_flight,
            "https://appstoreconnect.apple.com/apps/123/testflight/ios"
        );
        assert_eq!(
            links.review,
            "https://appstoreconnect.apple.com/apps/123/appstore/review"
        );
    }

    #[test]
    fn test_snapshot_omits_unrequested_sections() {
        let snapshot = DashboardSnapshot {
            app: AppSummary {
                id: "1".to_string(),
                bundle_id: "com.example".to_string(),
                name: "Example".to_string(),
            },
            builds: Some(BuildsSection::default()),
            phased_release: Some(PhasedReleaseSection::default()),
            ..DashboardSnapshot::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["app"]["bundleId"], "com.example");
        assert_eq!(json["builds"], serde_json::json!({}));
        assert_eq!(json["phasedRelease"], serde_json::json!({"configured": false}));
        assert!(json.get("testflight").is_none());
        assert!(json.get("links").is_none());
    }
}
