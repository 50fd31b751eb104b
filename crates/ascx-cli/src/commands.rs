// Rust guideline compliant 2026-10-12

//! Command implementations for the ascx CLI.

pub mod list;
pub mod status;
pub mod submit;
pub mod validate;

use anyhow::Result;
use ascx_app::AppError;
use ascx_core::{Client, Config, HttpTransport, RequestContext};
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs to talk to App Store Connect.
pub struct Session {
    /// Loaded configuration.
    pub config: Config,
    /// API client bound to the configured base URL.
    pub client: Client,
    /// Deadline shared by every request of the command.
    pub ctx: RequestContext,
}

impl Session {
    /// Builds the HTTP transport, client and request context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the base URL is
    /// invalid.
    pub fn connect(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.bearer_token.clone()).map_err(AppError::from)?;
        let client = Client::new(Arc::new(transport), &config.base_url).map_err(AppError::from)?;
        let ctx = RequestContext::with_timeout(config.timeout());
        debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "session ready");
        Ok(Self {
            config,
            client,
            ctx,
        })
    }

    /// Resolves the app ID from `--app`, falling back to configuration.
    ///
    /// # Errors
    ///
    /// Returns a usage error prefixed with `command` when neither is set.
    pub fn require_app(&self, flag: Option<&str>, command: &str) -> Result<String, AppError> {
        self.config.resolve_app_id(flag).ok_or_else(|| {
            AppError::Usage("--app is required (or set ASC_APP_ID)".to_string()).in_command(command)
        })
    }
}
