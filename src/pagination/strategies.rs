//! Pagination strategy implementations
//!
//! Each strategy serves one endpoint. Page, offset, link and token share the
//! same cursor machinery ([`PageCursor`]) and differ only in how exhaustion
//! is signalled and what they add to the page body.

use super::params::PaginationParameters;
use super::request::{requested_size, PageRequest};
use super::response::{PageResponse, Rejection};
use super::types::{PaginationState, PaginationType, Paginator};
use crate::error::{Error, Result};
use crate::loader::EndpointSpec;
use crate::template::{load_template, TemplateDocument};
use crate::types::{JsonObject, JsonValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::Span;

// ============================================================================
// Shared Cursor
// ============================================================================

/// How a strategy detects the end of the simulated dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exhaustion {
    /// 404 once every simulated page was served
    PageCount,
    /// Pages shrink to empty once every simulated record was served
    RecordCount,
}

/// Template, parameters and cursor state shared by the paging strategies.
///
/// The state sits behind a mutex: the exhaustion check, size resolution and
/// advance of one request happen as a single step.
#[derive(Debug)]
pub struct PageCursor {
    kind: PaginationType,
    template: TemplateDocument,
    params: PaginationParameters,
    state: Mutex<PaginationState>,
    span: Span,
}

impl PageCursor {
    fn new(kind: PaginationType, endpoint: &EndpointSpec) -> Result<Self> {
        let span = tracing::info_span!("paginator", endpoint = %endpoint.path, kind = %kind);

        let (params, template) = span.in_scope(|| -> Result<_> {
            let params = PaginationParameters::resolve(&endpoint.pagination, &endpoint.path)?;
            let template = TemplateDocument::load(
                &endpoint.response_obj_file_path,
                endpoint.response_field.as_deref(),
            )?;

            tracing::info!(
                response_field = template.response_field(),
                location = %params.location,
                size_key = params.size_key(kind),
                page_size = params.page_size,
                page_count = params.page_count,
                total_record_count = params.total_record_count,
                "paginator created"
            );
            Ok((params, template))
        })?;

        Ok(Self {
            kind,
            state: Mutex::new(params.initial_state()),
            template,
            params,
            span,
        })
    }

    /// Resolved parameters
    pub fn params(&self) -> &PaginationParameters {
        &self.params
    }

    /// The response template
    pub fn template(&self) -> &TemplateDocument {
        &self.template
    }

    fn lock_state(&self) -> MutexGuard<'_, PaginationState> {
        // A panic mid-request cannot leave the counters half-written
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> PaginationState {
        self.lock_state().clone()
    }

    /// Serve one request; `assemble` adds variant-specific fields to the page
    fn serve<F>(&self, request: &PageRequest, exhaustion: Exhaustion, assemble: F) -> PageResponse
    where
        F: FnOnce(&PaginationState, &mut JsonObject) -> std::result::Result<(), Rejection>,
    {
        let _entered = self.span.enter();

        match self.try_serve(request, exhaustion, assemble) {
            Ok(response) => response,
            Err(rejection) => {
                tracing::debug!(status = rejection.status().as_u16(), %rejection, "request rejected");
                rejection.into()
            }
        }
    }

    fn try_serve<F>(
        &self,
        request: &PageRequest,
        exhaustion: Exhaustion,
        assemble: F,
    ) -> std::result::Result<PageResponse, Rejection>
    where
        F: FnOnce(&PaginationState, &mut JsonObject) -> std::result::Result<(), Rejection>,
    {
        let (granted, state) = {
            let mut state = self.lock_state();

            if exhaustion == Exhaustion::PageCount && state.is_exhausted() {
                return Err(Rejection::Exhausted);
            }

            let default = i64::try_from(state.page_size).unwrap_or(i64::MAX);
            let requested = requested_size(
                request,
                self.params.location,
                self.params.size_key(self.kind),
                default,
            )?;

            let granted = state.advance(requested);
            tracing::debug!(
                requested,
                granted,
                page_sent_count = state.page_sent_count,
                sent_records_count = state.sent_records_count,
                "page served"
            );
            (granted, state.clone())
        };

        let count = usize::try_from(granted).map_err(|_| Rejection::Encode)?;
        let mut body = self
            .template
            .render(count)
            .ok_or(Rejection::InvalidResponseField)?;
        assemble(&state, &mut body)?;

        PageResponse::encode(&body)
    }
}

// ============================================================================
// Page Pagination
// ============================================================================

/// Page-based pagination (`?page=2&pageSize=50`)
///
/// Reads the page size from `pageSizeKey`; answers 404 once `pageCount`
/// pages were served.
#[derive(Debug)]
pub struct PagePaginator {
    cursor: PageCursor,
}

impl PagePaginator {
    /// Create a page paginator for an endpoint
    pub fn new(endpoint: &EndpointSpec) -> Result<Self> {
        Ok(Self {
            cursor: PageCursor::new(PaginationType::Page, endpoint)?,
        })
    }

    /// Shared cursor machinery
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }
}

impl Paginator for PagePaginator {
    fn kind(&self) -> PaginationType {
        PaginationType::Page
    }

    fn paginate(&self, request: &PageRequest) -> PageResponse {
        self.cursor
            .serve(request, Exhaustion::PageCount, |_, _| Ok(()))
    }

    fn snapshot(&self) -> Option<PaginationState> {
        Some(self.cursor.snapshot())
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination (`?offset=100&limit=50`)
///
/// Reads the page size from `limitKey`. Never answers 404: once the
/// simulated records run out, pages are empty.
#[derive(Debug)]
pub struct OffsetPaginator {
    cursor: PageCursor,
}

impl OffsetPaginator {
    /// Create an offset paginator for an endpoint
    pub fn new(endpoint: &EndpointSpec) -> Result<Self> {
        Ok(Self {
            cursor: PageCursor::new(PaginationType::Offset, endpoint)?,
        })
    }

    /// Shared cursor machinery
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }
}

impl Paginator for OffsetPaginator {
    fn kind(&self) -> PaginationType {
        PaginationType::Offset
    }

    fn paginate(&self, request: &PageRequest) -> PageResponse {
        tracing::debug!(
            offset_key = %self.cursor.params.offset_key,
            limit_key = %self.cursor.params.limit_key,
            location = %self.cursor.params.location,
            "offset request"
        );
        self.cursor
            .serve(request, Exhaustion::RecordCount, |_, _| Ok(()))
    }

    fn snapshot(&self) -> Option<PaginationState> {
        Some(self.cursor.snapshot())
    }
}

// ============================================================================
// Link Pagination
// ============================================================================

/// Link pagination
///
/// Like page pagination, and additionally writes the absolute URL of the
/// request, query sorted, into the link field of every page.
#[derive(Debug)]
pub struct LinkPaginator {
    cursor: PageCursor,
    link_key: String,
}

impl LinkPaginator {
    /// Create a link paginator for an endpoint.
    ///
    /// An explicitly configured `linkKey` must name a field of the template.
    pub fn new(endpoint: &EndpointSpec) -> Result<Self> {
        let cursor = PageCursor::new(PaginationType::Link, endpoint)?;

        if let Some(key) = &cursor.params.link_key {
            if !cursor.template.contains_field(key) {
                return Err(Error::InvalidLinkKey { key: key.clone() });
            }
        }

        let link_key = cursor.params.link_key().to_string();
        Ok(Self { cursor, link_key })
    }

    /// Field receiving the page link
    pub fn link_key(&self) -> &str {
        &self.link_key
    }
}

impl Paginator for LinkPaginator {
    fn kind(&self) -> PaginationType {
        PaginationType::Link
    }

    fn paginate(&self, request: &PageRequest) -> PageResponse {
        self.cursor
            .serve(request, Exhaustion::PageCount, |_, body| {
                let link = request.canonical_url().map_err(|e| {
                    tracing::warn!(error = %e, "failed to build page link");
                    Rejection::InvalidLink
                })?;
                body.insert(self.link_key.clone(), JsonValue::String(link));
                Ok(())
            })
    }

    fn snapshot(&self) -> Option<PaginationState> {
        Some(self.cursor.snapshot())
    }
}

// ============================================================================
// Token Pagination
// ============================================================================

/// Token pagination
///
/// Like page pagination, and additionally writes an opaque continuation
/// token into `tokenKey`; the token is `null` on the last page.
#[derive(Debug)]
pub struct TokenPaginator {
    cursor: PageCursor,
}

impl TokenPaginator {
    /// Create a token paginator for an endpoint
    pub fn new(endpoint: &EndpointSpec) -> Result<Self> {
        Ok(Self {
            cursor: PageCursor::new(PaginationType::Token, endpoint)?,
        })
    }

    /// Field receiving the continuation token
    pub fn token_key(&self) -> &str {
        &self.cursor.params.token_key
    }
}

/// Continuation token for the page after `state`, or `None` when the
/// simulated dataset is exhausted
pub fn next_token(state: &PaginationState) -> Option<String> {
    if state.is_exhausted() || state.remaining_records() == 0 {
        return None;
    }
    let raw = format!(
        "page:{}:{}",
        state.page_sent_count, state.sent_records_count
    );
    Some(URL_SAFE_NO_PAD.encode(raw))
}

impl Paginator for TokenPaginator {
    fn kind(&self) -> PaginationType {
        PaginationType::Token
    }

    fn paginate(&self, request: &PageRequest) -> PageResponse {
        self.cursor
            .serve(request, Exhaustion::PageCount, |state, body| {
                let token = next_token(state).map_or(JsonValue::Null, JsonValue::String);
                body.insert(self.cursor.params.token_key.clone(), token);
                Ok(())
            })
    }

    fn snapshot(&self) -> Option<PaginationState> {
        Some(self.cursor.snapshot())
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - the template is served as-is
#[derive(Debug)]
pub struct NoPaginator {
    body: PageResponse,
}

impl NoPaginator {
    /// Create a static responder for an endpoint
    pub fn new(endpoint: &EndpointSpec) -> Result<Self> {
        let template = load_template(&endpoint.response_obj_file_path)?;
        let body = PageResponse::encode(&template).map_err(|rejection| {
            Error::invalid_template(
                endpoint.response_obj_file_path.display().to_string(),
                rejection.to_string(),
            )
        })?;

        tracing::info!(endpoint = %endpoint.path, "static endpoint created");
        Ok(Self { body })
    }
}

impl Paginator for NoPaginator {
    fn kind(&self) -> PaginationType {
        PaginationType::None
    }

    fn paginate(&self, _request: &PageRequest) -> PageResponse {
        self.body.clone()
    }

    fn snapshot(&self) -> Option<PaginationState> {
        None
    }
}
