// Rust guideline compliant 2026-10-12

//! Origin pinning for resume cursors.
//!
//! A `--next` cursor is a full URL that can be pasted by a user or produced by
//! a script. Before it is used as a request target it must belong to the single
//! trusted API origin, otherwise the authenticated client could be pointed at
//! an arbitrary host.

use thiserror::Error;
use url::Url;

/// Base URL of the App Store Connect API.
pub const APP_STORE_CONNECT_BASE_URL: &str = "https://api.appstoreconnect.apple.com";

/// Reasons a resume cursor is rejected.
///
/// The messages are phrased to follow a `<command>: --next` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The cursor is not a URL at all.
    #[error("must be a valid URL: {0}")]
    Malformed(String),

    /// The cursor parses but points outside the trusted origin.
    #[error("must be an App Store Connect URL")]
    ForeignOrigin,
}

/// The scheme, host and port pair requests may be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedOrigin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl TrustedOrigin {
    /// Returns the App Store Connect API origin.
    #[must_use]
    pub fn app_store_connect() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "api.appstoreconnect.apple.com".to_string(),
            port: Some(443),
        }
    }

    /// Derives the origin from an API base URL.
    ///
    /// # Errors
    ///
    /// Returns `CursorError::Malformed` if the base URL has no host.
    pub fn from_base_url(base: &Url) -> Result<Self, CursorError> {
        let host = base
            .host_str()
            .ok_or_else(|| CursorError::Malformed(format!("{} has no host", base)))?;
        Ok(Self {
            scheme: base.scheme().to_string(),
            host: host.to_string(),
            port: base.port_or_known_default(),
        })
    }

    /// Returns whether an already-parsed URL belongs to this origin.
    #[must_use]
    pub fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str() == Some(self.host.as_str())
            && url.port_or_known_default() == self.port
            && url.username().is_empty()
            && url.password().is_none()
    }

    /// Validates a resume cursor and returns it as a request target.
    ///
    /// This is a pure check: no request is made.
    ///
    /// # Arguments
    ///
    /// * `raw` - The cursor as supplied by the user or a previous page link
    ///
    /// # Returns
    ///
    /// The parsed URL, unchanged apart from surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `CursorError::Malformed` if the string cannot be parsed or carries an
    ///   invalid percent escape
    /// - `CursorError::ForeignOrigin` if it parses but its scheme, host, port
    ///   or userinfo do not match this origin
    pub fn validate(&self, raw: &str) -> Result<Url, CursorError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CursorError::Malformed("empty URL".to_string()));
        }
        check_percent_escapes(raw)?;

        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) if raw.contains("://") => {
                return Err(CursorError::Malformed(format!(
                    "parse {:?}: missing protocol scheme",
                    raw
                )))
            }
            // A bare reference has no scheme or host to trust.
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(CursorError::ForeignOrigin)
            }
            Err(err) => return Err(CursorError::Malformed(format!("parse {:?}: {}", raw, err))),
        };

        if !self.contains(&url) {
            return Err(CursorError::ForeignOrigin);
        }
        Ok(url)
    }
}

impl Default for TrustedOrigin {
    fn default() -> Self {
        Self::app_store_connect()
    }
}

fn check_percent_escapes(raw: &str) -> Result<(), CursorError> {
    let bytes = raw.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let valid = bytes.len() >= idx + 3
                && bytes[idx + 1].is_ascii_hexdigit()
                && bytes[idx + 2].is_ascii_hexdigit();
            if !valid {
                let end = (idx + 3).min(bytes.len());
                let escape = String::from_utf8_lossy(&bytes[idx..end]);
                return Err(CursorError::Malformed(format!(
                    "parse {:?}: invalid URL escape {:?}",
                    raw, escape
                )));
            }
            idx += 3;
        } else {
            idx += 1;
        }
    }
    Ok(())
}
