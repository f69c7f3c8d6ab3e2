// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # mockpager
//!
//! A mock HTTP server that simulates paginated APIs from static JSON
//! templates.
//!
//! ## Features
//!
//! - **Declarative endpoints**: YAML or JSON configuration, one entry per
//!   (method, path)
//! - **Pagination strategies**: Page, offset, link and token, plus static
//!   responses
//! - **Simulated datasets**: Configurable page counts and record totals, with
//!   exhaustion answered by 404
//! - **Per-endpoint rate limits**: Token bucket quotas answered by 429
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mockpager::{build_router, load_config, register_endpoints, Result};
//! use mockpager::server::StartupPolicy;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let def = load_config("mock.yaml")?;
//!     let endpoints = register_endpoints(&def, StartupPolicy::Abort)?;
//!     let app = build_router(&endpoints, Duration::from_secs(10));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                Config (YAML/JSON) → Loader               │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────┬───────────────┴──────────┬──────────────────┐
//! │  Template  │       Pagination         │      Server      │
//! ├────────────┼──────────────────────────┼──────────────────┤
//! │ Load       │ Page     Link            │ Router           │
//! │ Field pick │ Offset   Token           │ Rate limit       │
//! │ Render     │ None     Cursor state    │ Trace / Timeout  │
//! └────────────┴──────────────────────────┴──────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// YAML/JSON loader for endpoint definitions
pub mod loader;

/// Response templates
pub mod template;

/// Pagination strategies
pub mod pagination;

/// HTTP server
pub mod server;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str, EndpointSpec, ServerDefinition};
pub use pagination::{create_paginator, PageRequest, PageResponse, Paginator};
pub use server::{build_router, register_endpoints};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
