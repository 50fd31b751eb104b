// Rust guideline compliant 2026-10-12

//! Pre-submission readiness checks for an App Store version.
//!
//! Checks run in a fixed order and append issues to one report. A check never
//! aborts the run because a sub-resource is unreachable; it records a warning
//! instead. Only a failure to fetch the version itself ends the run early.

use crate::error::{AppError, Result};
use crate::readiness::ReadinessReport;
use ascx_core::{Client, Error as CoreError, RequestContext};
use serde::Serialize;
use std::ops::ControlFlow;
use tracing::{debug, info};

const COMMAND: &str = "submit validate";

/// Platforms accepted by `--platform`.
pub const PLATFORMS: [&str; 4] = ["IOS", "MAC_OS", "TV_OS", "VISION_OS"];

/// Version states in which metadata can still be edited and submitted.
const EDITABLE_STATES: [&str; 6] = [
    "PREPARE_FOR_SUBMISSION",
    "DEVELOPER_REJECTED",
    "REJECTED",
    "METADATA_REJECTED",
    "INVALID_BINARY",
    "DEVELOPER_REMOVED_FROM_SALE",
];

/// How the version to validate was identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// Explicit version ID.
    Id(String),
    /// Version string, resolved per platform.
    VersionString(String),
}

/// Builds a selector from the mutually exclusive `--version` and
/// `--version-id` flags.
///
/// # Errors
///
/// Returns `AppError::Usage` if neither or both are set.
pub fn parse_version_selector(
    version: Option<&str>,
    version_id: Option<&str>,
) -> Result<VersionSelector> {
    let version = version.map(str::trim).filter(|v| !v.is_empty());
    let version_id = version_id.map(str::trim).filter(|v| !v.is_empty());
    match (version, version_id) {
        (Some(_), Some(_)) => Err(AppError::Usage(
            "--version and --version-id are mutually exclusive".to_string(),
        )),
        (None, None) => Err(AppError::Usage(
            "--version or --version-id is required".to_string(),
        )),
        (Some(version), None) => Ok(VersionSelector::VersionString(version.to_string())),
        (None, Some(id)) => Ok(VersionSelector::Id(id.to_string())),
    }
}

/// Normalizes a `--platform` value.
///
/// # Errors
///
/// Returns `AppError::Usage` for an unsupported platform.
pub fn normalize_platform(value: &str) -> Result<String> {
    let upper = value.trim().to_uppercase();
    if upper.is_empty() {
        return Ok(PLATFORMS[0].to_string());
    }
    if PLATFORMS.contains(&upper.as_str()) {
        return Ok(upper);
    }
    Err(AppError::Usage(format!(
        "--platform must be one of: {}",
        PLATFORMS.join(", ")
    )))
}

/// Resolves a selector to a version ID.
///
/// # Errors
///
/// Returns an error prefixed with the command path if the lookup fails or no
/// version matches.
pub fn resolve_version_id(
    client: &Client,
    ctx: &RequestContext,
    app_id: &str,
    selector: &VersionSelector,
    platform: &str,
) -> Result<String> {
    let version = match selector {
        VersionSelector::Id(id) => return Ok(id.clone()),
        VersionSelector::VersionString(version) => version,
    };
    let versions = client
        .find_app_store_versions(ctx, app_id, version, platform)
        .map_err(|source| AppError::Request {
            context: COMMAND.to_string(),
            source,
        })?;
    versions
        .into_iter()
        .next()
        .map(|found| found.id)
        .ok_or_else(|| AppError::Request {
            context: COMMAND.to_string(),
            source: CoreError::NotFound(format!(
                "app store version {:?} for platform {}",
                version, platform
            )),
        })
}

/// Identity of a submission readiness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionTarget {
    pub app_id: String,
    pub version_id: String,
    pub platform: String,
}

/// Submission readiness report.
pub type SubmissionReport = ReadinessReport<VersionTarget>;

struct Checklist<'a> {
    client: &'a Client,
    ctx: &'a RequestContext,
    app_id: &'a str,
    version_id: &'a str,
}

type Check = fn(&Checklist<'_>, &mut SubmissionReport) -> ControlFlow<()>;

const SUBMISSION_CHECKS: [(&str, Check); 5] = [
    ("version", check_version),
    ("build", check_build),
    ("version_localizations", check_version_localizations),
    ("app_info", check_app_info),
    ("age_rating", check_age_rating),
];

/// Runs every submission check against a version.
///
/// # Arguments
///
/// * `client` - API client
/// * `ctx` - Request context shared by every request
/// * `target` - App, version and platform being validated
///
/// # Returns
///
/// The report; it is ready iff no check recorded an error.
pub fn validate_submission(
    client: &Client,
    ctx: &RequestContext,
    target: VersionTarget,
) -> SubmissionReport {
    let mut report = ReadinessReport::new(target.clone());
    let checklist = Checklist {
        client,
        ctx,
        app_id: &target.app_id,
        version_id: &target.version_id,
    };

    for (name, check) in SUBMISSION_CHECKS {
        let flow = check(&checklist, &mut report);
        debug!(check = name, errors = report.error_count, "check completed");
        if flow.is_break() {
            break;
        }
    }
    info!(
        version_id = %target.version_id,
        errors = report.error_count,
        warnings = report.warning_count,
        "submission validation finished"
    );
    report
}

/// Converts a report with errors into the command's failure.
///
/// # Errors
///
/// Returns `AppError::NotReady` when the report has errors.
pub fn ensure_submission_ready(report: &SubmissionReport) -> Result<()> {
    if report.error_count > 0 {
        return Err(AppError::NotReady(format!(
            "{}: {} error(s) found",
            COMMAND, report.error_count
        )));
    }
    Ok(())
}

fn check_version(list: &Checklist<'_>, report: &mut SubmissionReport) -> ControlFlow<()> {
    let version = match list.client.get_app_store_version(list.ctx, list.version_id) {
        Ok(doc) => doc.data,
        Err(err) => {
            report.add_error("version", format!("failed to fetch version: {}", err));
            return ControlFlow::Break(());
        }
    };
    let state = version.attributes.resolved_state().to_uppercase();
    if !EDITABLE_STATES.contains(&state.as_str()) {
        report.add_error(
            "version_state",
            format!(
                "version is in non-editable state: {}",
                version.attributes.resolved_state()
            ),
        );
    }
    ControlFlow::Continue(())
}

fn check_build(list: &Checklist<'_>, report: &mut SubmissionReport) -> ControlFlow<()> {
    match list.client.get_app_store_version_build(list.ctx, list.version_id) {
        Ok(_) => {}
        Err(err) if err.is_not_found() => {
            report.add_error("build", "no build attached to this version");
        }
        Err(err) => report.add_warning("build", format!("unable to check build: {}", err)),
    }
    ControlFlow::Continue(())
}

fn check_version_localizations(
    list: &Checklist<'_>,
    report: &mut SubmissionReport,
) -> ControlFlow<()> {
    let localizations = match list.client.list_version_localizations(list.ctx, list.version_id) {
        Ok(items) => items,
        Err(err) => {
            report.add_warning("version_localizations", format!("unable to fetch: {}", err));
            return ControlFlow::Continue(());
        }
    };
    if localizations.is_empty() {
        report.add_error("version_localizations", "no version localizations found");
        return ControlFlow::Continue(());
    }

    for localization in &localizations {
        let locale = &localization.attributes.locale;
        if localization.attributes.description.trim().is_empty() {
            report.add_error("description", format!("locale {}: description is empty", locale));
        }
        if localization.attributes.keywords.trim().is_empty() {
            report.add_warning("keywords", format!("locale {}: keywords are empty", locale));
        }
        check_screenshots(list, report, &localization.id, locale);
    }
    ControlFlow::Continue(())
}

fn check_screenshots(
    list: &Checklist<'_>,
    report: &mut SubmissionReport,
    localization_id: &str,
    locale: &str,
) {
    let sets = match list.client.list_screenshot_sets(list.ctx, localization_id) {
        Ok(sets) => sets,
        Err(err) => {
            report.add_warning(
                "screenshots",
                format!("locale {}: unable to check screenshots: {}", locale, err),
            );
            return;
        }
    };
    if sets.is_empty() {
        report.add_error("screenshots", format!("locale {}: no screenshot sets found", locale));
        return;
    }

    for set in &sets {
        let display_type = &set.attributes.screenshot_display_type;
        match list.client.list_screenshots(list.ctx, &set.id) {
            Ok(shots) if shots.is_empty() => report.add_warning(
                "screenshots",
                format!("locale {} ({}): empty screenshot set", locale, display_type),
            ),
            Ok(_) => {}
            Err(err) => report.add_warning(
                "screenshots",
                format!("locale {} ({}): unable to check: {}", locale, display_type, err),
            ),
        }
    }
}

fn check_app_info(list: &Checklist<'_>, report: &mut SubmissionReport) -> ControlFlow<()> {
    let infos = match list.client.list_app_infos(list.ctx, list.app_id) {
        Ok(infos) => infos,
        Err(err) => {
            report.add_warning("app_info", format!("unable to fetch app info: {}", err));
            return ControlFlow::Continue(());
        }
    };
    let Some(info) = infos.first() else {
        report.add_error("app_info", "no app info records found");
        return ControlFlow::Continue(());
    };

    let localizations = match list.client.list_app_info_localizations(list.ctx, &info.id) {
        Ok(items) => items,
        Err(err) => {
            report.add_warning("app_info_localizations", format!("unable to fetch: {}", err));
            return ControlFlow::Continue(());
        }
    };
    if localizations.is_empty() {
        report.add_error("app_info_localizations", "no app info localizations found");
        return ControlFlow::Continue(());
    }

    for localization in &localizations {
        let locale = &localization.attributes.locale;
        if localization.attributes.name.trim().is_empty() {
            report.add_error("name", format!("locale {}: app name is empty", locale));
        }
        if localization.attributes.privacy_policy_url.trim().is_empty() {
            report.add_warning(
                "privacy_policy_url",
                format!("locale {}: privacy policy URL is empty", locale),
            );
        }
    }
    ControlFlow::Continue(())
}

fn check_age_rating(list: &Checklist<'_>, report: &mut SubmissionReport) -> ControlFlow<()> {
    match list.client.get_age_rating_declaration(list.ctx, list.version_id) {
        Ok(_) => {}
        Err(err) if err.is_not_found() => {
            report.add_error("age_rating", "no age rating declaration found");
        }
        Err(err) => report.add_warning("age_rating", format!("unable to check: {}", err)),
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_requires_exactly_one_flag() {
        let err = parse_version_selector(None, None).unwrap_err();
        assert_eq!(err.to_string(), "--version or --version-id is required");
        let err = parse_version_selector(Some("1.0"), Some("ver-1")).unwrap_err();
        assert_eq!(err.to_string(), "--version and --version-id are mutually exclusive");
        assert!(err.is_usage());
    }

    #[test]
    fn test_selector_ignores_blank_values() {
        assert_eq!(
            parse_version_selector(Some("  "), Some("ver-1")).unwrap(),
            VersionSelector::Id("ver-1".to_string())
        );
        assert_eq!(
            parse_version_selector(Some("2.1"), None).unwrap(),
            VersionSelector::VersionString("2.1".to_string())
        );
    }

    #[test]
    fn test_platform_normalization() {
        assert_eq!(normalize_platform("").unwrap(), "IOS");
        assert_eq!(normalize_platform("mac_os").unwrap(), "MAC_OS");
        let err = normalize_platform("android").unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("IOS, MAC_OS, TV_OS, VISION_OS"));
    }

    #[test]
    fn test_ensure_ready_reports_error_count() {
        let mut report = ReadinessReport::new(VersionTarget {
            app_id: "app".to_string(),
            version_id: "ver".to_string(),
            platform: "IOS".to_string(),
        });
        assert!(ensure_submission_ready(&report).is_ok());
        report.add_warning("keywords", "locale en-US: keywords are empty");
        assert!(ensure_submission_ready(&report).is_ok());
        report.add_error("build", "no build attached to this version");
        report.add_error("age_rating", "no age rating declaration found");
        let err = ensure_submission_ready(&report).unwrap_err();
        assert_eq!(err.to_string(), "submit validate: 2 error(s) found");
    }
}
