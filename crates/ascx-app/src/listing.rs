// Rust guideline compliant 2026-10-12

//! Listing of paginated collection endpoints with `--next` resume support.

use crate::error::{AppError, Result};
use ascx_core::models::{ListDocument, PageLinks, Resource};
use ascx_core::{Client, PageMode, RequestContext, MAX_PAGE_LIMIT};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Collections that can be listed page by page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    BundleIds,
    BundleIdCapabilities,
    BundleIdProfiles,
    AppTags,
    AppTagTerritories,
    InAppPurchases,
    SubscriptionGroups,
}

impl Collection {
    /// Returns the command path used to prefix errors.
    #[must_use]
    pub fn command(self) -> &'static str {
        match self {
            Collection::BundleIds => "bundle-ids list",
            Collection::BundleIdCapabilities => "bundle-ids capabilities list",
            Collection::BundleIdProfiles => "bundle-ids profiles list",
            Collection::AppTags => "app-tags list",
            Collection::AppTagTerritories => "app-tags territories list",
            Collection::InAppPurchases => "iap list",
            Collection::SubscriptionGroups => "subscriptions groups list",
        }
    }

    /// Returns the flag naming the parent resource, if the collection has one.
    #[must_use]
    pub fn parent_flag(self) -> Option<&'static str> {
        match self {
            Collection::BundleIds => None,
            Collection::BundleIdCapabilities => Some("--bundle"),
            Collection::BundleIdProfiles | Collection::AppTagTerritories => Some("--id"),
            Collection::AppTags | Collection::InAppPurchases | Collection::SubscriptionGroups => {
                Some("--app")
            }
        }
    }

    fn segments(self, parent: &str) -> Vec<&str> {
        match self {
            Collection::BundleIds => vec!["v1", "bundleIds"],
            Collection::BundleIdCapabilities => {
                vec!["v1", "bundleIds", parent, "bundleIdCapabilities"]
            }
            Collection::BundleIdProfiles => vec!["v1", "bundleIds", parent, "profiles"],
            Collection::AppTags => vec!["v1", "apps", parent, "appTags"],
            Collection::AppTagTerritories => vec!["v1", "appTags", parent, "territories"],
            Collection::InAppPurchases => vec!["v1", "apps", parent, "inAppPurchasesV2"],
            Collection::SubscriptionGroups => vec!["v1", "apps", parent, "subscriptionGroups"],
        }
    }
}

/// Options shared by every list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Parent resource ID; required unless `next` is set.
    pub parent_id: Option<String>,
    /// Page size for the first page.
    pub limit: Option<usize>,
    /// Resume URL from a previous page.
    pub next: Option<String>,
    /// Follow every page instead of returning one.
    pub paginate: bool,
}

/// Items and links of a listing.
///
/// With pagination the links are empty, since every page was consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage {
    pub data: Vec<Resource<Value>>,
    pub links: PageLinks,
}

impl From<ListDocument<Value>> for ListPage {
    fn from(doc: ListDocument<Value>) -> Self {
        Self {
            data: doc.data,
            links: doc.links,
        }
    }
}

/// Validates list options without touching the network.
///
/// # Errors
///
/// Returns a usage or cursor error prefixed with the command path.
pub fn plan_listing(
    client: &Client,
    collection: Collection,
    options: &ListOptions,
) -> Result<ListPlan> {
    let command = collection.command();
    if let Some(limit) = options.limit {
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(AppError::Usage(format!(
                "{}: --limit must be between 1 and {}",
                command, MAX_PAGE_LIMIT
            )));
        }
    }

    let next = options
        .next
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty());
    if let Some(raw) = next {
        let mode = client.resume(raw).map_err(|source| AppError::InvalidCursor {
            command: command.to_string(),
            source,
        })?;
        return Ok(ListPlan {
            collection,
            parent_id: String::new(),
            mode,
        });
    }

    let parent_id = options
        .parent_id
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if let Some(flag) = collection.parent_flag() {
        if parent_id.is_empty() {
            return Err(AppError::Usage(format!("{}: {} is required", command, flag)));
        }
    }
    Ok(ListPlan {
        collection,
        parent_id,
        mode: PageMode::Limit(options.limit.unwrap_or(MAX_PAGE_LIMIT)),
    })
}

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPlan {
    collection: Collection,
    parent_id: String,
    mode: PageMode,
}

/// Lists a collection.
///
/// Without `paginate` exactly one request is made and the page links are
/// returned so the caller can resume. With `paginate` every page is fetched,
/// starting at the first page or at the resume URL.
///
/// # Errors
///
/// Returns usage and cursor errors before any request, and request failures
/// prefixed with the command path.
pub fn list_collection(
    client: &Client,
    ctx: &RequestContext,
    collection: Collection,
    options: &ListOptions,
) -> Result<ListPage> {
    let plan = plan_listing(client, collection, options)?;
    let command = plan.collection.command();
    let to_request_error = |source| AppError::Request {
        context: command.to_string(),
        source,
    };

    let endpoint = client
        .endpoint(&plan.collection.segments(&plan.parent_id), &[])
        .map_err(to_request_error)?;
    debug!(command, paginate = options.paginate, "listing collection");

    if options.paginate {
        let data = client
            .paginate::<Value>(ctx, endpoint, plan.mode)
            .and_then(|pages| pages.collect_all())
            .map_err(to_request_error)?;
        return Ok(ListPage {
            data,
            links: PageLinks::default(),
        });
    }

    let target = client.page_target(endpoint, plan.mode).map_err(to_request_error)?;
    let page = client
        .get_page::<Value>(ctx, &target)
        .map_err(to_request_error)?;
    Ok(page.into())
}
