//! Endpoint registration and routing
//!
//! Turns a server definition into an axum router: one paginator per
//! endpoint, one method route per (method, path).

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::loader::{check_route_conflicts, EndpointSpec, ServerDefinition};
use crate::pagination::{
    create_paginator, PageRequest, PageResponse, Paginator, Rejection, CONTENT_TYPE_JSON,
};
use crate::types::Method;
use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use axum::Router;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

/// What to do when an endpoint cannot be constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartupPolicy {
    /// Abort startup on the first failing endpoint
    #[default]
    Abort,
    /// Log the failing endpoint and serve the others
    SkipInvalid,
}

/// An endpoint ready to serve traffic
#[derive(Debug, Clone)]
pub struct RegisteredEndpoint {
    /// HTTP method
    pub method: Method,
    /// Route path
    pub path: String,
    /// The endpoint's paginator, shared by all its requests
    pub paginator: Arc<dyn Paginator>,
    /// Optional request quota
    pub rate_limiter: Option<RateLimiter>,
}

impl RegisteredEndpoint {
    /// Construct the paginator and rate limiter of an endpoint
    pub fn from_spec(spec: &EndpointSpec) -> Result<Self> {
        let method = spec
            .http_method()
            .map_err(|e| e.for_endpoint(&spec.method, &spec.path))?;
        let paginator: Arc<dyn Paginator> = Arc::from(create_paginator(spec)?);

        let rate_limiter = (spec.rate_limit > 0)
            .then(|| RateLimiter::new(RateLimiterConfig::per_second(spec.rate_limit)));

        Ok(Self {
            method,
            path: spec.path.clone(),
            paginator,
            rate_limiter,
        })
    }

    /// Serve one request
    pub fn handle(&self, request: &PageRequest) -> PageResponse {
        if let Some(limiter) = &self.rate_limiter {
            if !limiter.try_acquire() {
                tracing::debug!(method = %self.method, path = %self.path, "rate limit exceeded");
                return Rejection::RateLimited.into();
            }
        }
        self.paginator.paginate(request)
    }
}

/// Construct every endpoint of a definition according to `policy`
pub fn register_endpoints(
    def: &ServerDefinition,
    policy: StartupPolicy,
) -> Result<Vec<RegisteredEndpoint>> {
    check_route_conflicts(&def.endpoints)?;

    let mut registered = Vec::with_capacity(def.endpoints.len());

    for spec in &def.endpoints {
        match RegisteredEndpoint::from_spec(spec) {
            Ok(endpoint) => {
                tracing::info!(
                    method = %endpoint.method,
                    path = %endpoint.path,
                    kind = %endpoint.paginator.kind(),
                    "endpoint registered"
                );
                registered.push(endpoint);
            }
            Err(e) if policy == StartupPolicy::SkipInvalid && e.is_construction_error() => {
                tracing::warn!(error = %e, "skipping endpoint");
            }
            Err(e) => return Err(e),
        }
    }

    if registered.is_empty() {
        return Err(Error::config("No endpoint could be registered"));
    }

    Ok(registered)
}

/// Build the router serving `endpoints`
pub fn build_router(endpoints: &[RegisteredEndpoint], request_timeout: Duration) -> Router {
    let mut routes: BTreeMap<&str, MethodRouter> = BTreeMap::new();

    for endpoint in endpoints {
        let shared = Arc::new(endpoint.clone());
        let handler = move |uri: Uri, headers: HeaderMap, body: Bytes| {
            let endpoint = Arc::clone(&shared);
            async move {
                let request = PageRequest::from_parts(&uri, headers, body);
                into_http(endpoint.handle(&request))
            }
        };

        let method_router = routes
            .remove(endpoint.path.as_str())
            .unwrap_or_else(MethodRouter::new)
            .on(endpoint.method.into(), handler);
        routes.insert(endpoint.path.as_str(), method_router);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let headers = request.headers();
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                query = request.uri().query().unwrap_or_default(),
                request_id = header_str(headers, "x-request-id"),
                user_id = header_str(headers, "x-user-id"),
                user_agent = header_str(headers, "user-agent"),
            )
        })
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    routes
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(path, method_router)
        })
        .layer(
            ServiceBuilder::new()
                .layer(trace)
                .layer(cors)
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn into_http(response: PageResponse) -> Response {
    (
        response.status,
        [(CONTENT_TYPE, CONTENT_TYPE_JSON)],
        response.body,
    )
        .into_response()
}
