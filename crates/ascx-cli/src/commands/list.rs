// Rust guideline compliant 2026-10-12

//! Implementation of the paginated `list` subcommands.
//!
//! Every collection shares `--limit`, `--next` and `--paginate`.

use crate::commands::Session;
use crate::OutputFormatter;
use anyhow::Result;
use ascx_app::{list_collection, Collection, ListOptions};
use clap::Args;

/// Pagination flags shared by every list command.
#[derive(Debug, Clone, Default, Args)]
pub struct PageArgs {
    /// Maximum results per page (1-200)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Fetch the page at this URL (from a previous page's next link)
    #[arg(long)]
    pub next: Option<String>,

    /// Fetch every page
    #[arg(long)]
    pub paginate: bool,
}

/// Lists one collection.
///
/// # Arguments
///
/// * `session` - Client and request context
/// * `collection` - Which collection to list
/// * `parent` - Parent resource ID from the collection's flag, if any
/// * `page` - Pagination flags
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns a usage error for a bad `--limit`, `--next` or missing parent, and
/// a request error prefixed with the command path otherwise.
pub fn execute(
    session: &Session,
    collection: Collection,
    parent: Option<&str>,
    page: PageArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let parent_id = match collection.parent_flag() {
        Some("--app") => session.config.resolve_app_id(parent),
        _ => parent.map(str::to_string),
    };
    let options = ListOptions {
        parent_id,
        limit: page.limit,
        next: page.next,
        paginate: page.paginate,
    };

    let listing = list_collection(&session.client, &session.ctx, collection, &options)?;
    println!("{}", formatter.format_page(&listing));
    Ok(())
}
