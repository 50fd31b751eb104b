// Rust guideline compliant 2026-10-12

//! Implementation of `ascx validate iap` and `ascx validate subscriptions`.

use crate::commands::Session;
use crate::OutputFormatter;
use anyhow::Result;
use ascx_app::{
    ensure_catalog_ready, fetch_in_app_purchases, fetch_subscriptions, validate_catalog,
    CatalogKind,
};

/// Validates the review readiness of an app's purchasable products.
///
/// # Arguments
///
/// * `session` - Client and request context
/// * `kind` - In-app purchases or subscriptions
/// * `app` - Value of `--app`, if given
/// * `strict` - Treat every finding as blocking
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched, or after printing the
/// report when it has blocking issues.
pub fn execute(
    session: &Session,
    kind: CatalogKind,
    app: Option<&str>,
    strict: bool,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let app_id = session.require_app(app, kind.command())?;

    let items = match kind {
        CatalogKind::InAppPurchases => {
            fetch_in_app_purchases(&session.client, &session.ctx, &app_id)?
        }
        CatalogKind::Subscriptions => fetch_subscriptions(&session.client, &session.ctx, &app_id)?,
    };
    let report = validate_catalog(&app_id, kind, &items, strict);

    println!("{}", formatter.format_catalog(&report));
    ensure_catalog_ready(&report)?;
    Ok(())
}
