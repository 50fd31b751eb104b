// Rust guideline compliant 2026-10-12

//! Implementation of the `ascx status` command.
//!
//! Displays the release pipeline dashboard of one app.

use crate::commands::Session;
use crate::OutputFormatter;
use anyhow::Result;
use ascx_app::{collect_dashboard, parse_include};

/// Executes the status command.
///
/// # Arguments
///
/// * `session` - Client and request context
/// * `app` - Value of `--app`, if given
/// * `include` - Comma-separated sections; empty selects all
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if the input is invalid, the app cannot be fetched, or
/// any section fails. Nothing is printed in that case.
pub fn execute(
    session: &Session,
    app: Option<&str>,
    include: &str,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let includes = parse_include(include).map_err(|e| e.in_command("status"))?;
    let app_id = session.require_app(app, "status")?;

    let snapshot = collect_dashboard(&session.client, &session.ctx, &app_id, includes)?;
    println!("{}", formatter.format_dashboard(&snapshot));
    Ok(())
}
