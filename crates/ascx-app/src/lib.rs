// Rust guideline compliant 2026-10-12

//! Shared application services for ascx.
//!
//! This crate provides the non-CLI-specific logic behind every command:
//! bounded-parallel section aggregation, the release dashboard, submission and
//! catalog readiness checks, paginated listing, and standardized errors.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod listing;
pub mod readiness;
pub mod response;
pub mod sections;
pub mod submission;

pub use catalog::{
    ensure_catalog_ready, fetch_in_app_purchases, fetch_subscriptions, validate_catalog,
    CatalogItem, CatalogKind, CatalogReport, CatalogTarget,
};
pub use dashboard::{collect_dashboard, parse_include, DashboardSnapshot, IncludeSet};
pub use error::{AppError, ErrorCode, Result};
pub use listing::{list_collection, plan_listing, Collection, ListOptions, ListPage};
pub use readiness::{ReadinessIssue, ReadinessReport, Severity};
pub use response::ErrorEnvelope;
pub use sections::{run_sections, SectionTask, DEFAULT_SECTION_CONCURRENCY};
pub use submission::{
    ensure_submission_ready, normalize_platform, parse_version_selector, resolve_version_id,
    validate_submission, SubmissionReport, VersionSelector, VersionTarget,
};
