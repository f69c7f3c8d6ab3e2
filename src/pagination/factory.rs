//! Paginator factory
//!
//! Builds the paginator of an endpoint from its configuration. Everything
//! that can be wrong with an endpoint fails here, before traffic is served.

use super::strategies::{
    LinkPaginator, NoPaginator, OffsetPaginator, PagePaginator, TokenPaginator,
};
use super::types::{PaginationType, Paginator};
use crate::error::Result;
use crate::loader::EndpointSpec;

/// Create the paginator for an endpoint.
///
/// Errors are wrapped with the endpoint's method and path.
pub fn create_paginator(endpoint: &EndpointSpec) -> Result<Box<dyn Paginator>> {
    build(endpoint).map_err(|e| {
        tracing::warn!(
            method = %endpoint.method,
            path = %endpoint.path,
            error = %e,
            "failed to create paginator"
        );
        e.for_endpoint(endpoint.method.to_uppercase(), &endpoint.path)
    })
}

fn build(endpoint: &EndpointSpec) -> Result<Box<dyn Paginator>> {
    let kind: PaginationType = endpoint.pagination.kind.parse()?;

    let paginator: Box<dyn Paginator> = match kind {
        PaginationType::None => Box::new(NoPaginator::new(endpoint)?),
        PaginationType::Page => Box::new(PagePaginator::new(endpoint)?),
        PaginationType::Offset => Box::new(OffsetPaginator::new(endpoint)?),
        PaginationType::Link => Box::new(LinkPaginator::new(endpoint)?),
        PaginationType::Token => Box::new(TokenPaginator::new(endpoint)?),
    };

    Ok(paginator)
}
