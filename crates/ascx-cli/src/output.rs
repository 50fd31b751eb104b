// Rust guideline compliant 2026-10-12

//! Output formatting module for the ascx CLI.
//!
//! This module renders dashboards, readiness reports, listing pages and
//! errors as JSON, terminal tables or markdown tables.

use crate::terminal::{paint, severity_color};
use ascx_app::catalog::CatalogKind;
use ascx_app::{
    CatalogReport, DashboardSnapshot, ErrorEnvelope, ListPage, ReadinessIssue, SubmissionReport,
};
use ascx_core::OutputFormat;
use serde::Serialize;
use serde_json::json;
use tabled::{builder::Builder, settings::Style};
use termcolor::Color;

/// Output formatter trait.
///
/// Defines the interface for formatting command results in different output
/// formats.
pub trait OutputFormatter {
    /// Formats a dashboard snapshot.
    ///
    /// # Arguments
    /// * `snapshot` - The snapshot to format
    ///
    /// # Returns
    /// A formatted string representation of the snapshot
    fn format_dashboard(&self, snapshot: &DashboardSnapshot) -> String;

    /// Formats a submission readiness report.
    fn format_submission(&self, report: &SubmissionReport) -> String;

    /// Formats an in-app purchase or subscription readiness report.
    fn format_catalog(&self, report: &CatalogReport) -> String;

    /// Formats one listing page, or the accumulated items of every page.
    ///
    /// # Arguments
    /// * `page` - Items and links of the listing
    ///
    /// # Returns
    /// A formatted string; the next link is included when present
    fn format_page(&self, page: &ListPage) -> String;

    /// Formats an error for display on stderr.
    ///
    /// # Arguments
    /// * `error` - The error envelope to format
    ///
    /// # Returns
    /// A formatted error string
    fn format_error(&self, error: &ErrorEnvelope) -> String;
}

/// JSON output formatter.
///
/// Formats results as JSON for machine consumption.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    ///
    /// # Arguments
    /// * `pretty` - Whether to indent the output
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|e| json!({ "error": { "message": e.to_string() } }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_dashboard(&self, snapshot: &DashboardSnapshot) -> String {
        self.render(snapshot)
    }

    fn format_submission(&self, report: &SubmissionReport) -> String {
        self.render(report)
    }

    fn format_catalog(&self, report: &CatalogReport) -> String {
        self.render(report)
    }

    fn format_page(&self, page: &ListPage) -> String {
        self.render(page)
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        self.render(&json!({ "error": error }))
    }
}

/// Table output formatter.
///
/// Formats results as human-readable tables with optional colors.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    ///
    /// # Arguments
    /// * `use_color` - Whether to use colored output
    ///
    /// # Returns
    /// A new TableFormatter instance
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_dashboard(&self, snapshot: &DashboardSnapshot) -> String {
        dashboard_sections(snapshot)
            .into_iter()
            .map(|(title, rows)| {
                format!(
                    "{}\n{}",
                    paint(title, Color::Cyan, true, self.use_color),
                    field_table(rows, Flavor::Terminal)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_submission(&self, report: &SubmissionReport) -> String {
        render_report(&Verdict::of_submission(report), Flavor::Terminal, self.use_color)
    }

    fn format_catalog(&self, report: &CatalogReport) -> String {
        render_report(&Verdict::of_catalog(report), Flavor::Terminal, self.use_color)
    }

    fn format_page(&self, page: &ListPage) -> String {
        render_page(page, Flavor::Terminal)
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        format!(
            "{} {}",
            paint("Error:", Color::Red, true, self.use_color),
            error.message
        )
    }
}

/// Markdown output formatter.
///
/// Formats results as markdown tables, suitable for release notes and PRs.
pub struct MarkdownFormatter;

impl OutputFormatter for MarkdownFormatter {
    fn format_dashboard(&self, snapshot: &DashboardSnapshot) -> String {
        dashboard_sections(snapshot)
            .into_iter()
            .map(|(title, rows)| {
                format!("### {}\n\n{}", title, field_table(rows, Flavor::Markdown))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_submission(&self, report: &SubmissionReport) -> String {
        render_report(&Verdict::of_submission(report), Flavor::Markdown, false)
    }

    fn format_catalog(&self, report: &CatalogReport) -> String {
        render_report(&Verdict::of_catalog(report), Flavor::Markdown, false)
    }

    fn format_page(&self, page: &ListPage) -> String {
        render_page(page, Flavor::Markdown)
    }

    fn format_error(&self, error: &ErrorEnvelope) -> String {
        format!("Error: {}", error.message)
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format
/// * `pretty` - Whether JSON output is indented
/// * `use_color` - Whether to use colored output (table format only)
///
/// # Returns
/// A boxed OutputFormatter instance
pub fn create_formatter(
    format: OutputFormat,
    pretty: bool,
    use_color: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(pretty)),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Terminal,
    Markdown,
}

fn render_table(header: &[&str], rows: Vec<Vec<String>>, flavor: Flavor) -> String {
    let mut builder = Builder::default();
    builder.push_record(header.iter().copied());
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    match flavor {
        Flavor::Terminal => table.with(Style::modern()),
        Flavor::Markdown => table.with(Style::markdown()),
    };
    table.to_string()
}

fn field_table(rows: Vec<(&'static str, String)>, flavor: Flavor) -> String {
    let rows = rows
        .into_iter()
        .map(|(field, value)| vec![field.to_string(), or_dash(value)])
        .collect();
    render_table(&["Field", "Value"], rows, flavor)
}

fn or_dash(value: String) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value
    }
}

type SectionRows = (&'static str, Vec<(&'static str, String)>);

fn dashboard_sections(snapshot: &DashboardSnapshot) -> Vec<SectionRows> {
    let mut sections = vec![(
        "App",
        vec![
            ("id", snapshot.app.id.clone()),
            ("name", snapshot.app.name.clone()),
            ("bundleId", snapshot.app.bundle_id.clone()),
        ],
    )];

    if let Some(builds) = &snapshot.builds {
        let rows = match &builds.latest {
            Some(latest) => vec![
                ("id", latest.id.clone()),
                ("version", latest.version.clone()),
                ("buildNumber", latest.build_number.clone()),
                ("processingState", latest.processing_state.clone()),
                ("uploadedDate", latest.uploaded_date.clone()),
                ("platform", latest.platform.clone()),
            ],
            None => vec![("latest", "none".to_string())],
        };
        sections.push(("Builds", rows));
    }
    if let Some(testflight) = &snapshot.testflight {
        sections.push((
            "TestFlight",
            vec![
                ("latestDistributedBuildId", testflight.latest_distributed_build_id.clone()),
                ("betaReviewState", testflight.beta_review_state.clone()),
                ("externalBuildState", testflight.external_build_state.clone()),
                ("submittedDate", testflight.submitted_date.clone()),
            ],
        ));
    }
    if let Some(appstore) = &snapshot.appstore {
        sections.push((
            "App Store",
            vec![
                ("versionId", appstore.version_id.clone()),
                ("version", appstore.version.clone()),
                ("state", appstore.state.clone()),
                ("platform", appstore.platform.clone()),
                ("createdDate", appstore.created_date.clone()),
            ],
        ));
    }
    if let Some(submission) = &snapshot.submission {
        let blocking = if submission.blocking_issues.is_empty() {
            "none".to_string()
        } else {
            submission.blocking_issues.join("; ")
        };
        sections.push((
            "Submission",
            vec![
                ("inFlight", submission.in_flight.to_string()),
                ("blockingIssues", blocking),
            ],
        ));
    }
    if let Some(review) = &snapshot.review {
        sections.push((
            "Review",
            vec![
                ("latestSubmissionId", review.latest_submission_id.clone()),
                ("state", review.state.clone()),
                ("submittedDate", review.submitted_date.clone()),
                ("platform", review.platform.clone()),
            ],
        ));
    }
    if let Some(phased) = &snapshot.phased_release {
        let mut rows = vec![("configured", phased.configured.to_string())];
        if phased.configured {
            rows.extend([
                ("id", phased.id.clone()),
                ("state", phased.state.clone()),
                ("startDate", phased.start_date.clone()),
                ("currentDayNumber", phased.current_day_number.to_string()),
                ("totalPauseDuration", phased.total_pause_duration.to_string()),
            ]);
        }
        sections.push(("Phased Release", rows));
    }
    if let Some(links) = &snapshot.links {
        sections.push((
            "Links",
            vec![
                ("appStoreConnect", links.app_store_connect.clone()),
                ("testFlight", links.test_flight.clone()),
                ("review", links.review.clone()),
            ],
        ));
    }
    sections
}

/// The parts of a readiness report shared by every report kind.
struct Verdict<'a> {
    target: Vec<(&'static str, String)>,
    issues: &'a [ReadinessIssue],
    error_count: usize,
    warning_count: usize,
    ready: bool,
}

impl<'a> Verdict<'a> {
    fn of_submission(report: &'a SubmissionReport) -> Self {
        Self {
            target: vec![
                ("appId", report.target.app_id.clone()),
                ("versionId", report.target.version_id.clone()),
                ("platform", report.target.platform.clone()),
            ],
            issues: &report.issues,
            error_count: report.error_count,
            warning_count: report.warning_count,
            ready: report.ready,
        }
    }

    fn of_catalog(report: &'a CatalogReport) -> Self {
        let kind = match report.target.kind {
            CatalogKind::InAppPurchases => "in-app purchases",
            CatalogKind::Subscriptions => "subscriptions",
        };
        Self {
            target: vec![
                ("appId", report.target.app_id.clone()),
                ("kind", kind.to_string()),
                ("items", report.target.item_count.to_string()),
            ],
            issues: &report.issues,
            error_count: report.error_count,
            warning_count: report.warning_count,
            ready: report.ready,
        }
    }
}

fn render_report(verdict: &Verdict<'_>, flavor: Flavor, use_color: bool) -> String {
    let status = if verdict.ready {
        paint("READY", Color::Green, true, use_color)
    } else {
        paint("NOT READY", Color::Red, true, use_color)
    };
    let summary = match flavor {
        Flavor::Terminal => format!(
            "Status: {}\nErrors: {}  Warnings: {}",
            status, verdict.error_count, verdict.warning_count
        ),
        Flavor::Markdown => format!(
            "**Status:** {}\n\n**Errors:** {}  **Warnings:** {}",
            status, verdict.error_count, verdict.warning_count
        ),
    };

    let rows = if verdict.issues.is_empty() {
        vec![vec![
            "all".to_string(),
            "info".to_string(),
            "no issues found".to_string(),
        ]]
    } else {
        verdict
            .issues
            .iter()
            .map(|issue| {
                let severity = issue.severity.as_str();
                vec![
                    issue.check.clone(),
                    paint(severity, severity_color(severity), false, use_color),
                    issue.message.clone(),
                ]
            })
            .collect()
    };

    format!(
        "{}\n\n{}\n\n{}",
        summary,
        field_table(verdict.target.clone(), flavor),
        render_table(&["Check", "Severity", "Message"], rows, flavor)
    )
}

fn render_page(page: &ListPage, flavor: Flavor) -> String {
    if page.data.is_empty() {
        return match page.links.next_url() {
            Some(next) => format!("No resources on this page.\nNext: {}", next),
            None => "No resources found.".to_string(),
        };
    }

    let rows = page
        .data
        .iter()
        .map(|resource| {
            vec![
                resource.kind.clone(),
                resource.id.clone(),
                attribute_summary(&resource.attributes),
            ]
        })
        .collect();
    let table = render_table(&["Type", "ID", "Attributes"], rows, flavor);
    match page.links.next_url() {
        Some(next) => format!("{}\n\nNext: {}", table, next),
        None => table,
    }
}

fn attribute_summary(attributes: &serde_json::Value) -> String {
    match attributes.as_object() {
        Some(map) if !map.is_empty() => map
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| match value.as_str() {
                Some(text) => format!("{}={}", key, text),
                None => format!("{}={}", key, value),
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}
