//! Pagination parameter resolution
//!
//! Turns the declarative `options` map of an endpoint into concrete key names
//! and simulated totals. Absent or wrong-typed options fall back to defaults.

use super::types::{PaginationState, PaginationType, ParamLocation};
use crate::error::Result;
use crate::loader::PaginationDefinition;
use crate::types::{JsonObject, JsonValue};

/// Default page number parameter
pub const DEFAULT_PAGE_KEY: &str = "page";
/// Default page size parameter
pub const DEFAULT_PAGE_SIZE_KEY: &str = "pageSize";
/// Default offset parameter
pub const DEFAULT_OFFSET_KEY: &str = "offset";
/// Default limit parameter
pub const DEFAULT_LIMIT_KEY: &str = "limit";
/// Default response field holding the page link
pub const DEFAULT_LINK_KEY: &str = "link";
/// Default response field holding the continuation token
pub const DEFAULT_TOKEN_KEY: &str = "nextToken";
/// Default page size
pub const DEFAULT_PAGE_SIZE: u64 = 100;
/// Default number of simulated pages
pub const DEFAULT_PAGE_COUNT: u64 = 2;
/// Default number of simulated records
pub const DEFAULT_TOTAL_RECORD_COUNT: u64 = 200;
/// Most records a single page may hold, whatever size is requested
pub const MAX_PAGE_SIZE: u64 = 10_000;

/// Concrete pagination parameters for one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParameters {
    /// Where the page size is read from
    pub location: ParamLocation,
    /// Page number parameter
    pub page_key: String,
    /// Page size parameter
    pub page_size_key: String,
    /// Offset parameter
    pub offset_key: String,
    /// Limit parameter
    pub limit_key: String,
    /// Link field, when configured explicitly
    pub link_key: Option<String>,
    /// Token field
    pub token_key: String,
    /// Default page size
    pub page_size: u64,
    /// Simulated page count
    pub page_count: u64,
    /// Simulated record count
    pub total_record_count: u64,
}

impl Default for PaginationParameters {
    fn default() -> Self {
        Self {
            location: ParamLocation::default(),
            page_key: DEFAULT_PAGE_KEY.to_string(),
            page_size_key: DEFAULT_PAGE_SIZE_KEY.to_string(),
            offset_key: DEFAULT_OFFSET_KEY.to_string(),
            limit_key: DEFAULT_LIMIT_KEY.to_string(),
            link_key: None,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_count: DEFAULT_PAGE_COUNT,
            total_record_count: DEFAULT_TOTAL_RECORD_COUNT,
        }
    }
}

impl PaginationParameters {
    /// Resolve parameters from a pagination definition.
    ///
    /// Only an unrecognized `location` is an error; every option falls back
    /// to its default.
    pub fn resolve(def: &PaginationDefinition, endpoint: &str) -> Result<Self> {
        let location = match def.location.as_deref() {
            Some(location) => location.parse()?,
            None => {
                tracing::info!(endpoint, "location not specified, using query");
                ParamLocation::Query
            }
        };

        let options = &def.options;
        let defaults = Self::default();

        Ok(Self {
            location,
            page_key: string_option(options, "pageKey", endpoint)
                .unwrap_or(defaults.page_key),
            page_size_key: string_option(options, "pageSizeKey", endpoint)
                .unwrap_or(defaults.page_size_key),
            offset_key: string_option(options, "offsetKey", endpoint)
                .unwrap_or(defaults.offset_key),
            limit_key: string_option(options, "limitKey", endpoint)
                .unwrap_or(defaults.limit_key),
            link_key: string_option(options, "linkKey", endpoint),
            token_key: string_option(options, "tokenKey", endpoint)
                .unwrap_or(defaults.token_key),
            page_size: count_option(options, "pageSize", endpoint)
                .unwrap_or(defaults.page_size),
            page_count: count_option(options, "pageCount", endpoint)
                .unwrap_or(defaults.page_count),
            total_record_count: count_option(options, "totalRecordCount", endpoint)
                .unwrap_or(defaults.total_record_count),
        })
    }

    /// The parameter carrying the requested page size for a variant
    pub fn size_key(&self, kind: PaginationType) -> &str {
        match kind {
            PaginationType::Offset => &self.limit_key,
            _ => &self.page_size_key,
        }
    }

    /// The response field receiving the page link
    pub fn link_key(&self) -> &str {
        self.link_key.as_deref().unwrap_or(DEFAULT_LINK_KEY)
    }

    /// A fresh cursor at the start of the simulated dataset
    pub fn initial_state(&self) -> PaginationState {
        PaginationState {
            page_sent_count: 0,
            sent_records_count: 0,
            total_page_count: self.page_count,
            total_record_count: self.total_record_count,
            page_key: self.page_key.clone(),
            page_size_key: self.page_size_key.clone(),
            page_size: self.page_size,
        }
    }
}

fn string_option(options: &JsonObject, key: &str, endpoint: &str) -> Option<String> {
    match options.get(key) {
        Some(JsonValue::String(value)) if !value.is_empty() => Some(value.clone()),
        Some(other) => {
            tracing::info!(endpoint, key, value = %other, "option is not a string, using default");
            None
        }
        None => {
            tracing::debug!(endpoint, key, "option not specified, using default");
            None
        }
    }
}

fn count_option(options: &JsonObject, key: &str, endpoint: &str) -> Option<u64> {
    let value = options.get(key)?;
    let count = value
        .as_u64()
        .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64));

    if count.is_none() {
        tracing::info!(endpoint, key, %value, "option is not a non-negative number, using default");
    }
    count
}
