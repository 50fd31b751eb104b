// Rust guideline compliant 2026-10-12

//! Review readiness of in-app purchases and subscriptions.

use crate::error::{AppError, Result};
use crate::readiness::{ReadinessReport, Severity};
use ascx_core::{Client, RequestContext};
use serde::Serialize;
use tracing::info;

/// States that need developer action before review.
const NEEDS_ACTION_STATES: [&str; 3] = ["MISSING_METADATA", "DEVELOPER_ACTION_NEEDED", "REJECTED"];

const READY_TO_SUBMIT: &str = "READY_TO_SUBMIT";

/// Kind of catalog being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    InAppPurchases,
    Subscriptions,
}

impl CatalogKind {
    /// Returns the command path of the validation command.
    #[must_use]
    pub fn command(self) -> &'static str {
        match self {
            CatalogKind::InAppPurchases => "validate iap",
            CatalogKind::Subscriptions => "validate subscriptions",
        }
    }

    fn check_name(self) -> &'static str {
        match self {
            CatalogKind::InAppPurchases => "iap_state",
            CatalogKind::Subscriptions => "subscription_state",
        }
    }
}

/// One purchasable product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub product_id: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Identity of a catalog readiness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTarget {
    pub app_id: String,
    pub kind: CatalogKind,
    pub item_count: usize,
}

/// Catalog readiness report.
pub type CatalogReport = ReadinessReport<CatalogTarget>;

/// Fetches every in-app purchase of an app.
///
/// # Errors
///
/// Returns `AppError::Request` naming the failed fetch.
pub fn fetch_in_app_purchases(
    client: &Client,
    ctx: &RequestContext,
    app_id: &str,
) -> Result<Vec<CatalogItem>> {
    let purchases = client
        .list_in_app_purchases(ctx, app_id)
        .map_err(|source| AppError::Request {
            context: format!(
                "{}: failed to fetch in-app purchases",
                CatalogKind::InAppPurchases.command()
            ),
            source,
        })?;
    Ok(purchases
        .into_iter()
        .map(|item| CatalogItem {
            id: item.id,
            name: item.attributes.name,
            product_id: item.attributes.product_id,
            state: item.attributes.state,
            group_id: None,
        })
        .collect())
}

/// Fetches every subscription of every subscription group of an app.
///
/// Groups are visited in fetch order; groups without an ID are skipped.
///
/// # Errors
///
/// Returns `AppError::Request` naming the failed fetch.
pub fn fetch_subscriptions(
    client: &Client,
    ctx: &RequestContext,
    app_id: &str,
) -> Result<Vec<CatalogItem>> {
    let command = CatalogKind::Subscriptions.command();
    let groups = client
        .list_subscription_groups(ctx, app_id)
        .map_err(|source| AppError::Request {
            context: format!("{}: failed to fetch subscription groups", command),
            source,
        })?;

    let mut items = Vec::new();
    for group in groups.iter().filter(|group| !group.id.trim().is_empty()) {
        let subscriptions = client
            .list_subscriptions(ctx, &group.id)
            .map_err(|source| AppError::Request {
                context: format!(
                    "{}: failed to fetch subscriptions for group {}",
                    command, group.id
                ),
                source,
            })?;
        items.extend(subscriptions.into_iter().map(|item| CatalogItem {
            id: item.id,
            name: item.attributes.name,
            product_id: item.attributes.product_id,
            state: item.attributes.state,
            group_id: Some(group.id.clone()),
        }));
    }
    Ok(items)
}

/// Classifies every item by its review state.
///
/// Findings are warnings unless `strict` is set, in which case they are
/// errors and make the report not ready.
///
/// # Arguments
///
/// * `app_id` - App the items belong to
/// * `kind` - Which catalog the items come from
/// * `items` - Items in fetch order
/// * `strict` - Escalate every finding to an error
pub fn validate_catalog(
    app_id: &str,
    kind: CatalogKind,
    items: &[CatalogItem],
    strict: bool,
) -> CatalogReport {
    let mut report = ReadinessReport::new(CatalogTarget {
        app_id: app_id.to_string(),
        kind,
        item_count: items.len(),
    });
    let severity = if strict {
        Severity::Error
    } else {
        Severity::Warning
    };

    for item in items {
        if let Some(finding) = classify_state(&item.state) {
            report.add(
                kind.check_name(),
                severity,
                format!("{}: {}", item_label(item), finding),
            );
        }
    }
    info!(
        command = kind.command(),
        items = items.len(),
        errors = report.error_count,
        warnings = report.warning_count,
        "catalog validation finished"
    );
    report
}

/// Converts a report with blocking issues into the command's failure.
///
/// # Errors
///
/// Returns `AppError::NotReady` when the report has errors.
pub fn ensure_catalog_ready(report: &CatalogReport) -> Result<()> {
    if report.error_count > 0 {
        return Err(AppError::NotReady(format!(
            "{}: found {} blocking issue(s)",
            report.target.kind.command(),
            report.error_count
        )));
    }
    Ok(())
}

fn classify_state(state: &str) -> Option<String> {
    let state = state.trim().to_uppercase();
    if state.is_empty() {
        return Some("state unknown".to_string());
    }
    if NEEDS_ACTION_STATES.contains(&state.as_str()) {
        return Some(format!("needs action (state {})", state));
    }
    if state == READY_TO_SUBMIT {
        return Some(format!("not yet submitted (state {})", state));
    }
    None
}

fn item_label(item: &CatalogItem) -> String {
    let product = if item.product_id.trim().is_empty() {
        &item.id
    } else {
        &item.product_id
    };
    if item.name.trim().is_empty() {
        format!("product {}", product)
    } else {
        format!("product {} ({})", product, item.name)
    }
}
