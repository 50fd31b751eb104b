// Rust guideline compliant 2026-10-12

//! Caller-supplied deadline and cancellation for outstanding requests.
//!
//! The CLI only sets a deadline from the configured timeout. The cancellation
//! token is for library callers that own an external signal and need to stop
//! a run mid-flight.

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag.
///
/// Clones observe the same flag, so one handle can cancel every request that
/// was handed another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to every holder of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether cancellation was signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-invocation request context.
///
/// Every API call receives the same context; there is no per-operation timeout
/// apart from the deadline stored here.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: CancelToken,
}

impl RequestContext {
    /// Returns a context without deadline or cancellation.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a context whose deadline is `timeout` from now.
    ///
    /// A timeout too large to represent as an instant means no deadline.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancel: CancelToken::new(),
        }
    }

    /// Replaces the cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns the cancellation token carried by this context.
    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Returns the time left before the deadline, if one is set.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fails if the context was cancelled or its deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Cancelled` or `Error::DeadlineExceeded`.
    pub fn check(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if matches!(self.remaining(), Some(left) if left.is_zero()) {
            return Err(Error::DeadlineExceeded);
        }
        Ok(())
    }
}
