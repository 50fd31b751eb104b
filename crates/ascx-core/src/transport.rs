// Rust guideline compliant 2026-10-12

//! Transport abstraction and the blocking HTTP transport.

use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::models::ApiErrorDocument;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

/// Executes GET requests against the API.
///
/// Implementations must fail with `Error::NotFound` for a 404 so callers can
/// tell "missing" from every other failure.
pub trait Transport: Send + Sync {
    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the context is cancelled or expired, the request
    /// fails, or the API answers with a non-success status.
    fn get(&self, ctx: &RequestContext, url: &Url) -> Result<Vec<u8>>;
}

/// `reqwest`-backed transport.
///
/// Requests are never retried. Redirects are not followed so an authenticated
/// request cannot be bounced off the trusted origin.
pub struct HttpTransport {
    http: HttpClient,
    bearer_token: Option<String>,
}

impl HttpTransport {
    /// Creates a transport that attaches `bearer_token` to every request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` if the HTTP client cannot be built.
    pub fn new(bearer_token: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { http, bearer_token })
    }
}

impl Transport for HttpTransport {
    fn get(&self, ctx: &RequestContext, url: &Url) -> Result<Vec<u8>> {
        ctx.check()?;
        debug!(%url, "GET");

        let mut request = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, concat!("ascx/", env!("CARGO_PKG_VERSION")));
        if let Some(remaining) = ctx.remaining() {
            request = request.timeout(remaining);
        }
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| map_send_error(ctx, e))?;
        let status = response.status();
        let body = response.bytes().map_err(|e| map_send_error(ctx, e))?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "response");

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let message = serde_json::from_slice::<ApiErrorDocument>(&body)
            .ok()
            .and_then(|doc| doc.summary())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(message));
        }
        Err(Error::Status {
            status: status.as_u16(),
            message,
        })
    }
}

fn map_send_error(ctx: &RequestContext, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        return Error::DeadlineExceeded;
    }
    if ctx.cancel_token().is_cancelled() {
        return Error::Cancelled;
    }
    Error::Transport(err.to_string())
}
