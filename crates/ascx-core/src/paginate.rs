// Rust guideline compliant 2026-10-12

//! Cursor pagination over collection endpoints.
//!
//! A traversal starts either at the first page (endpoint plus `limit`) or at a
//! resume URL that already passed origin validation. Each step issues exactly
//! one request and follows `links.next` verbatim until it is empty.

use crate::client::Client;
use crate::context::RequestContext;
use crate::error::Result;
use crate::models::Resource;
use serde::de::DeserializeOwned;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use tracing::debug;
use url::Url;

/// Largest page size the API accepts.
pub const MAX_PAGE_LIMIT: usize = 200;

/// Where a traversal starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMode {
    /// First page of the endpoint with the given page size.
    Limit(usize),
    /// A validated resume URL, used as-is.
    Resume(Url),
}

impl Default for PageMode {
    fn default() -> Self {
        PageMode::Limit(MAX_PAGE_LIMIT)
    }
}

/// Lazy, finite sequence of pages.
///
/// Yields one `Vec` of items per request. After an error or the terminal page
/// the iterator is exhausted; it cannot be restarted, a caller that wants to
/// resume must start a new traversal from an explicit cursor.
pub struct Pages<'a, A> {
    client: &'a Client,
    ctx: &'a RequestContext,
    next: Option<Url>,
    requests: usize,
    _marker: PhantomData<fn() -> A>,
}

impl<'a, A> Pages<'a, A> {
    pub(crate) fn new(client: &'a Client, ctx: &'a RequestContext, start: Url) -> Self {
        Self {
            client,
            ctx,
            next: Some(start),
            requests: 0,
            _marker: PhantomData,
        }
    }

    /// Returns how many requests this traversal issued so far.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl<A: DeserializeOwned + Default> Pages<'_, A> {
    /// Drains the traversal into one list in fetch order.
    ///
    /// No de-duplication or sorting is applied.
    ///
    /// # Errors
    ///
    /// Returns the first failure; items fetched before it are discarded.
    pub fn collect_all(self) -> Result<Vec<Resource<A>>> {
        let mut items = Vec::new();
        for page in self {
            items.extend(page?);
        }
        Ok(items)
    }
}

impl<A: DeserializeOwned + Default> Iterator for Pages<'_, A> {
    type Item = Result<Vec<Resource<A>>>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = self.next.take()?;
        self.requests += 1;

        let page = match self.client.get_page::<A>(self.ctx, &url) {
            Ok(page) => page,
            Err(err) => return Some(Err(err)),
        };

        if let Some(raw) = page.links.next_url() {
            // Re-pinned on every hop, not only for user-supplied cursors.
            match self.client.origin().validate(raw) {
                Ok(next) => self.next = Some(next),
                Err(err) => return Some(Err(err.into())),
            }
        }
        debug!(
            page = self.requests,
            items = page.data.len(),
            more = self.next.is_some(),
            "fetched page"
        );

        Some(Ok(page.data))
    }
}

impl<A: DeserializeOwned + Default> FusedIterator for Pages<'_, A> {}
