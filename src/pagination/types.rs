//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use super::params::MAX_PAGE_SIZE;
use super::request::PageRequest;
use super::response::PageResponse;
use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported pagination types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationType {
    /// Serve the template verbatim
    None,
    /// Page number / page size
    Page,
    /// Offset / limit
    Offset,
    /// Page size plus an absolute link to the current page
    Link,
    /// Page size plus an opaque continuation token
    Token,
}

impl PaginationType {
    /// Name as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationType::None => "none",
            PaginationType::Page => "page",
            PaginationType::Offset => "offset",
            PaginationType::Link => "link",
            PaginationType::Token => "token",
        }
    }
}

impl fmt::Display for PaginationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaginationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PaginationType::None),
            "page" => Ok(PaginationType::Page),
            "offset" => Ok(PaginationType::Offset),
            "link" => Ok(PaginationType::Link),
            "token" => Ok(PaginationType::Token),
            other => Err(Error::UnsupportedPaginationType {
                kind: other.to_string(),
            }),
        }
    }
}

/// Where the requested page size is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// A field of the JSON request body
    Body,
    /// A query string parameter
    #[default]
    Query,
    /// A request header
    Header,
}

impl ParamLocation {
    /// Name as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Body => "body",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "body" => Ok(ParamLocation::Body),
            "query" => Ok(ParamLocation::Query),
            "header" => Ok(ParamLocation::Header),
            other => Err(Error::invalid_value(
                "pagination.location",
                format!("expected body, query or header, found '{other}'"),
            )),
        }
    }
}

/// Cursor over the simulated dataset of one endpoint.
///
/// Invariants after every call that is not rejected:
/// `sent_records_count <= total_record_count` and
/// `page_sent_count <= total_page_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// Pages served so far
    pub page_sent_count: u64,
    /// Records served so far
    pub sent_records_count: u64,
    /// Simulated number of pages
    pub total_page_count: u64,
    /// Simulated number of records
    pub total_record_count: u64,
    /// Name of the page number parameter
    pub page_key: String,
    /// Name of the page size parameter
    pub page_size_key: String,
    /// Page size used when the request does not supply one
    pub page_size: u64,
}

impl PaginationState {
    /// Records left in the simulated dataset
    pub fn remaining_records(&self) -> u64 {
        self.total_record_count.saturating_sub(self.sent_records_count)
    }

    /// All simulated pages have been served
    pub fn is_exhausted(&self) -> bool {
        self.page_sent_count >= self.total_page_count
    }

    /// Bound a requested size to what the dataset still holds.
    ///
    /// Negative requests yield zero records; no page exceeds
    /// [`MAX_PAGE_SIZE`].
    pub fn clamp(&self, requested: i64) -> u64 {
        u64::try_from(requested)
            .unwrap_or(0)
            .min(MAX_PAGE_SIZE)
            .min(self.remaining_records())
    }

    /// Serve one page of at most `requested` records and return how many
    /// records the page holds
    pub fn advance(&mut self, requested: i64) -> u64 {
        let granted = self.clamp(requested);
        self.page_sent_count = (self.page_sent_count + 1).min(self.total_page_count);
        self.sent_records_count += granted;
        granted
    }
}

/// Core trait for pagination strategies.
///
/// One paginator serves every request to its endpoint; implementations
/// guard their cursor so concurrent requests advance it one at a time.
pub trait Paginator: Send + Sync + fmt::Debug {
    /// The pagination variant
    fn kind(&self) -> PaginationType;

    /// Serve one request, advancing the cursor
    fn paginate(&self, request: &PageRequest) -> PageResponse;

    /// Copy of the current cursor, if the variant keeps one
    fn snapshot(&self) -> Option<PaginationState>;
}
