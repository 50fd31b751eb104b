// Rust guideline compliant 2026-10-12

//! Typed App Store Connect client.
//!
//! The client owns the base URL and the trusted origin derived from it. All
//! network access goes through the injected `Transport`, which keeps the
//! client usable from tests without a server.

use crate::context::RequestContext;
use crate::cursor::{CursorError, TrustedOrigin};
use crate::error::{Error, Result};
use crate::models::{
    self, AppAttributes, AppInfoLocalizationAttributes, AppStoreVersionAttributes,
    BetaAppReviewSubmissionAttributes, BuildAttributes, BuildBetaDetailAttributes, Document,
    InAppPurchaseAttributes, ListDocument, PhasedReleaseAttributes, PreReleaseVersionAttributes,
    Resource, ReviewSubmissionAttributes, ScreenshotAttributes, ScreenshotSetAttributes,
    SubscriptionAttributes, SubscriptionGroupAttributes, VersionLocalizationAttributes,
};
use crate::paginate::{PageMode, Pages, MAX_PAGE_LIMIT};
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Number of recent builds inspected by the dashboard.
pub const RECENT_BUILDS_LIMIT: usize = 50;

/// App Store Connect API client.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base: Url,
    origin: TrustedOrigin,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base.as_str())
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport used for every request
    /// * `base_url` - API base URL; its scheme and host become the trusted origin
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the base URL is invalid or has no host.
    pub fn new(transport: Arc<dyn Transport>, base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid base URL {:?}", base_url)));
        }
        let origin = TrustedOrigin::from_base_url(&base)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        Ok(Self {
            transport,
            base,
            origin,
        })
    }

    /// Returns the trusted origin.
    #[must_use]
    pub fn origin(&self) -> &TrustedOrigin {
        &self.origin
    }

    /// Validates a user-supplied resume cursor.
    ///
    /// # Errors
    ///
    /// Returns the `CursorError` describing why the cursor was rejected.
    pub fn resume(&self, raw: &str) -> std::result::Result<PageMode, CursorError> {
        self.origin.validate(raw).map(PageMode::Resume)
    }

    /// Builds an endpoint URL from path segments and query pairs.
    ///
    /// Segments are percent-encoded individually, so IDs cannot alter the path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("invalid base URL {:?}", self.base.as_str())))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Fetches a single-resource document.
    ///
    /// # Errors
    ///
    /// Returns transport, status, or decode errors.
    pub fn get_document<A: DeserializeOwned + Default>(
        &self,
        ctx: &RequestContext,
        url: &Url,
    ) -> Result<Document<A>> {
        let body = self.transport.get(ctx, url)?;
        models::decode(&body)
    }

    /// Fetches one page of a collection.
    ///
    /// # Errors
    ///
    /// Returns transport, status, or decode errors.
    pub fn get_page<A: DeserializeOwned + Default>(
        &self,
        ctx: &RequestContext,
        url: &Url,
    ) -> Result<ListDocument<A>> {
        let body = self.transport.get(ctx, url)?;
        models::decode(&body)
    }

    /// Resolves the URL of the first request of a traversal.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Collection URL without `limit`
    /// * `mode` - First page by limit, or a validated resume URL
    ///
    /// # Errors
    ///
    /// Returns `Error::Cursor` if a resume URL is outside the trusted origin.
    pub fn page_target(&self, endpoint: Url, mode: PageMode) -> Result<Url> {
        match mode {
            PageMode::Limit(limit) => {
                let mut url = endpoint;
                let limit = limit.clamp(1, MAX_PAGE_LIMIT).to_string();
                url.query_pairs_mut().append_pair("limit", limit.as_str());
                Ok(url)
            }
            PageMode::Resume(url) => {
                if !self.origin.contains(&url) {
                    return Err(CursorError::ForeignOrigin.into());
                }
                Ok(url)
            }
        }
    }

    /// Starts a traversal of a collection endpoint.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Request context shared by every page request
    /// * `endpoint` - Collection URL without `limit`
    /// * `mode` - First page by limit, or a validated resume URL
    ///
    /// # Errors
    ///
    /// Returns `Error::Cursor` if a resume URL is outside the trusted origin.
    pub fn paginate<'a, A>(
        &'a self,
        ctx: &'a RequestContext,
        endpoint: Url,
        mode: PageMode,
    ) -> Result<Pages<'a, A>> {
        let start = self.page_target(endpoint, mode)?;
        Ok(Pages::new(self, ctx, start))
    }

    fn collect<A: DeserializeOwned + Default>(
        &self,
        ctx: &RequestContext,
        endpoint: Url,
    ) -> Result<Vec<Resource<A>>> {
        self.paginate(ctx, endpoint, PageMode::default())?
            .collect_all()
    }

    /// Fetches an app.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn get_app(&self, ctx: &RequestContext, app_id: &str) -> Result<Document<AppAttributes>> {
        let url = self.endpoint(&["v1", "apps", app_id], &[])?;
        self.get_document(ctx, &url)
    }

    /// Fetches the most recently uploaded builds of an app, newest first.
    ///
    /// Only the first page is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn recent_builds(
        &self,
        ctx: &RequestContext,
        app_id: &str,
        limit: usize,
    ) -> Result<Vec<Resource<BuildAttributes>>> {
        let limit = limit.clamp(1, MAX_PAGE_LIMIT).to_string();
        let url = self.endpoint(
            &["v1", "builds"],
            &[
                ("filter[app]", app_id),
                ("sort", "-uploadedDate"),
                ("limit", limit.as_str()),
            ],
        )?;
        Ok(self.get_page(ctx, &url)?.data)
    }

    /// Fetches the pre-release version a build belongs to.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the build has none.
    pub fn get_build_pre_release_version(
        &self,
        ctx: &RequestContext,
        build_id: &str,
    ) -> Result<Document<PreReleaseVersionAttributes>> {
        let url = self.endpoint(&["v1", "builds", build_id, "preReleaseVersion"], &[])?;
        self.get_document(ctx, &url)
    }

    /// Lists beta details for the given builds.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_build_beta_details(
        &self,
        ctx: &RequestContext,
        build_ids: &[String],
    ) -> Result<Vec<Resource<BuildBetaDetailAttributes>>> {
        let ids = build_ids.join(",");
        let url = self.endpoint(&["v1", "buildBetaDetails"], &[("filter[build]", ids.as_str())])?;
        self.collect(ctx, url)
    }

    /// Lists beta app review submissions for the given builds.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_beta_app_review_submissions(
        &self,
        ctx: &RequestContext,
        build_ids: &[String],
    ) -> Result<Vec<Resource<BetaAppReviewSubmissionAttributes>>> {
        let ids = build_ids.join(",");
        let url = self.endpoint(
            &["v1", "betaAppReviewSubmissions"],
            &[("filter[build]", ids.as_str())],
        )?;
        self.collect(ctx, url)
    }

    /// Lists every App Store version of an app.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_app_store_versions(
        &self,
        ctx: &RequestContext,
        app_id: &str,
    ) -> Result<Vec<Resource<AppStoreVersionAttributes>>> {
        let url = self.endpoint(&["v1", "apps", app_id, "appStoreVersions"], &[])?;
        self.collect(ctx, url)
    }

    /// Lists App Store versions matching a version string and platform.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn find_app_store_versions(
        &self,
        ctx: &RequestContext,
        app_id: &str,
        version: &str,
        platform: &str,
    ) -> Result<Vec<Resource<AppStoreVersionAttributes>>> {
        let url = self.endpoint(
            &["v1", "apps", app_id, "appStoreVersions"],
            &[("filter[versionString]", version), ("filter[platform]", platform)],
        )?;
        self.collect(ctx, url)
    }

    /// Fetches an App Store version.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn get_app_store_version(
        &self,
        ctx: &RequestContext,
        version_id: &str,
    ) -> Result<Document<AppStoreVersionAttributes>> {
        let url = self.endpoint(&["v1", "appStoreVersions", version_id], &[])?;
        self.get_document(ctx, &url)
    }

    /// Fetches the phased release of an App Store version.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no phased release is configured.
    pub fn get_phased_release(
        &self,
        ctx: &RequestContext,
        version_id: &str,
    ) -> Result<Document<PhasedReleaseAttributes>> {
        let url = self.endpoint(
            &["v1", "appStoreVersions", version_id, "appStoreVersionPhasedRelease"],
            &[],
        )?;
        self.get_document(ctx, &url)
    }

    /// Lists every review submission of an app.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_review_submissions(
        &self,
        ctx: &RequestContext,
        app_id: &str,
    ) -> Result<Vec<Resource<ReviewSubmissionAttributes>>> {
        let url = self.endpoint(&["v1", "reviewSubmissions"], &[("filter[app]", app_id)])?;
        self.collect(ctx, url)
    }

    /// Fetches the build attached to an App Store version.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no build is attached.
    pub fn get_app_store_version_build(
        &self,
        ctx: &RequestContext,
        version_id: &str,
    ) -> Result<Document<BuildAttributes>> {
        let url = self.endpoint(&["v1", "appStoreVersions", version_id, "build"], &[])?;
        self.get_document(ctx, &url)
    }

    /// Lists the localizations of an App Store version.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_version_localizations(
        &self,
        ctx: &RequestContext,
        version_id: &str,
    ) -> Result<Vec<Resource<VersionLocalizationAttributes>>> {
        let url = self.endpoint(
            &["v1", "appStoreVersions", version_id, "appStoreVersionLocalizations"],
            &[],
        )?;
        self.collect(ctx, url)
    }

    /// Lists screenshot sets of a version localization.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_screenshot_sets(
        &self,
        ctx: &RequestContext,
        localization_id: &str,
    ) -> Result<Vec<Resource<ScreenshotSetAttributes>>> {
        let url = self.endpoint(
            &["v1", "appStoreVersionLocalizations", localization_id, "appScreenshotSets"],
            &[],
        )?;
        self.collect(ctx, url)
    }

    /// Lists screenshots of a screenshot set.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_screenshots(
        &self,
        ctx: &RequestContext,
        set_id: &str,
    ) -> Result<Vec<Resource<ScreenshotAttributes>>> {
        let url = self.endpoint(&["v1", "appScreenshotSets", set_id, "appScreenshots"], &[])?;
        self.collect(ctx, url)
    }

    /// Lists app info records of an app.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_app_infos(&self, ctx: &RequestContext, app_id: &str) -> Result<Vec<Resource<Value>>> {
        let url = self.endpoint(&["v1", "apps", app_id, "appInfos"], &[])?;
        self.collect(ctx, url)
    }

    /// Lists localizations of an app info record.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_app_info_localizations(
        &self,
        ctx: &RequestContext,
        app_info_id: &str,
    ) -> Result<Vec<Resource<AppInfoLocalizationAttributes>>> {
        let url = self.endpoint(&["v1", "appInfos", app_info_id, "appInfoLocalizations"], &[])?;
        self.collect(ctx, url)
    }

    /// Fetches the age rating declaration of an App Store version.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if none exists.
    pub fn get_age_rating_declaration(
        &self,
        ctx: &RequestContext,
        version_id: &str,
    ) -> Result<Document<Value>> {
        let url = self.endpoint(
            &["v1", "appStoreVersions", version_id, "ageRatingDeclaration"],
            &[],
        )?;
        self.get_document(ctx, &url)
    }

    /// Lists every in-app purchase of an app.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_in_app_purchases(
        &self,
        ctx: &RequestContext,
        app_id: &str,
    ) -> Result<Vec<Resource<InAppPurchaseAttributes>>> {
        let url = self.endpoint(&["v1", "apps", app_id, "inAppPurchasesV2"], &[])?;
        self.collect(ctx, url)
    }

    /// Lists every subscription group of an app.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_subscription_groups(
        &self,
        ctx: &RequestContext,
        app_id: &str,
    ) -> Result<Vec<Resource<SubscriptionGroupAttributes>>> {
        let url = self.endpoint(&["v1", "apps", app_id, "subscriptionGroups"], &[])?;
        self.collect(ctx, url)
    }

    /// Lists every subscription of a subscription group.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub fn list_subscriptions(
        &self,
        ctx: &RequestContext,
        group_id: &str,
    ) -> Result<Vec<Resource<SubscriptionAttributes>>> {
        let url = self.endpoint(&["v1", "subscriptionGroups", group_id, "subscriptions"], &[])?;
        self.collect(ctx, url)
    }
}
