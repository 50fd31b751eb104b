// Rust guideline compliant 2026-10-12

//! ascx Core Library
//!
//! This crate provides the foundational components for the ascx App Store
//! Connect client:
//! - Data models (JSON:API resources, list documents, page links)
//! - Trusted-origin validation for resume cursors
//! - Request context (deadline and cancellation)
//! - Transport abstraction and the blocking HTTP transport
//! - Typed API client and the cursor paginator
//! - Deterministic latest-item selection
//! - Configuration and error types

pub mod client;
pub mod config;
pub mod context;
pub mod cursor;
pub mod error;
pub mod models;
pub mod paginate;
pub mod select;
pub mod transport;

pub use client::Client;
pub use config::{Config, OutputFormat};
pub use context::{CancelToken, RequestContext};
pub use cursor::{CursorError, TrustedOrigin, APP_STORE_CONNECT_BASE_URL};
pub use error::{Error, Result};
pub use models::{Document, ListDocument, PageLinks, Resource};
pub use paginate::{PageMode, Pages, MAX_PAGE_LIMIT};
pub use select::{select_latest, Timestamped};
pub use transport::{HttpTransport, Transport};
