//! HTTP server module
//!
//! Hosts the configured endpoints on axum.
//!
//! # Overview
//!
//! - `register_endpoints` - Build one paginator per endpoint, applying the
//!   startup policy to endpoints that fail construction
//! - `build_router` - Route every (method, path) to its paginator, with
//!   request tracing, timeouts and CORS
//! - `serve` - Bind, serve and shut down gracefully on signal

mod lifecycle;
mod rate_limit;
mod router;

pub use lifecycle::{serve, ServerConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use router::{build_router, register_endpoints, RegisteredEndpoint, StartupPolicy};
