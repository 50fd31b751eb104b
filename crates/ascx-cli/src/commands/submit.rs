// Rust guideline compliant 2026-10-12

//! Implementation of the `ascx submit validate` command.

use crate::commands::Session;
use crate::OutputFormatter;
use anyhow::Result;
use ascx_app::{
    ensure_submission_ready, normalize_platform, parse_version_selector, resolve_version_id,
    validate_submission, VersionTarget,
};

const COMMAND: &str = "submit validate";

/// Flags of `submit validate`.
#[derive(Debug, Clone, Default)]
pub struct ValidateArgs {
    pub app: Option<String>,
    pub version: Option<String>,
    pub version_id: Option<String>,
    pub platform: String,
}

/// Validates that an App Store version is ready to submit.
///
/// The report is always printed; the command fails afterwards if it holds
/// any error.
///
/// # Errors
///
/// Returns a usage error for conflicting flags, a request error if the version
/// cannot be resolved, and a not-ready error when the report has errors.
pub fn execute(
    session: &Session,
    args: ValidateArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let selector = parse_version_selector(args.version.as_deref(), args.version_id.as_deref())
        .map_err(|e| e.in_command(COMMAND))?;
    let platform = normalize_platform(&args.platform).map_err(|e| e.in_command(COMMAND))?;
    let app_id = session.require_app(args.app.as_deref(), COMMAND)?;

    let version_id =
        resolve_version_id(&session.client, &session.ctx, &app_id, &selector, &platform)?;
    let report = validate_submission(
        &session.client,
        &session.ctx,
        VersionTarget {
            app_id,
            version_id,
            platform,
        },
    );

    println!("{}", formatter.format_submission(&report));
    ensure_submission_ready(&report)?;
    Ok(())
}
