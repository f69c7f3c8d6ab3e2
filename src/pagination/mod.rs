//! Pagination module
//!
//! Supports: Page, Offset, Link, Token, None
//!
//! # Overview
//!
//! Each configured endpoint owns one paginator. A paginator replicates the
//! first record of its response template into pages whose size is read from
//! the request, and advances a cursor over a simulated dataset so that
//! successive requests see page boundaries and exhaustion.

mod factory;
mod params;
mod request;
mod response;
mod strategies;
mod types;

pub use factory::create_paginator;
pub use params::{
    PaginationParameters, DEFAULT_LIMIT_KEY, DEFAULT_LINK_KEY, DEFAULT_OFFSET_KEY,
    DEFAULT_PAGE_COUNT, DEFAULT_PAGE_KEY, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_KEY,
    DEFAULT_TOKEN_KEY, DEFAULT_TOTAL_RECORD_COUNT, MAX_PAGE_SIZE,
};
pub use request::{requested_size, PageRequest};
pub use response::{PageResponse, Rejection, CONTENT_TYPE_JSON};
pub use strategies::{
    next_token, LinkPaginator, NoPaginator, OffsetPaginator, PageCursor, PagePaginator,
    TokenPaginator,
};
pub use types::{PaginationState, PaginationType, Paginator, ParamLocation};
