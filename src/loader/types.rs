//! Loader types
//!
//! Declarative endpoint definition types for YAML/JSON parsing.

use crate::error::{Error, Result};
use crate::types::{JsonObject, Method};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Server Definition
// ============================================================================

/// Top-level mock server definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDefinition {
    /// Endpoints to serve
    #[serde(default)]
    pub endpoints: Vec<EndpointSpec>,
}

// ============================================================================
// Endpoint Definition
// ============================================================================

/// A single mocked endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSpec {
    /// Route path (axum syntax, e.g. `/users/:id`)
    pub path: String,
    /// HTTP method
    #[serde(default = "default_method")]
    pub method: String,
    /// Pagination configuration
    #[serde(default)]
    pub pagination: PaginationDefinition,
    /// Path to the JSON response template
    #[serde(default, alias = "responseFile")]
    pub response_obj_file_path: PathBuf,
    /// Field of the template holding the array to paginate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_field: Option<String>,
    /// Requests per second allowed on this endpoint (0 = unlimited)
    #[serde(default)]
    pub rate_limit: u32,
}

impl EndpointSpec {
    /// Create an endpoint spec with no pagination options
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        template: impl Into<PathBuf>,
        pagination: PaginationDefinition,
    ) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            pagination,
            response_obj_file_path: template.into(),
            response_field: None,
            rate_limit: 0,
        }
    }

    /// Set the explicit response field
    #[must_use]
    pub fn with_response_field(mut self, field: impl Into<String>) -> Self {
        self.response_field = Some(field.into());
        self
    }

    /// Set the per-second rate limit
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Parsed HTTP method
    pub fn http_method(&self) -> Result<Method> {
        self.method
            .parse()
            .map_err(|e: String| Error::invalid_value("method", e))
    }
}

fn default_method() -> String {
    "GET".to_string()
}

// ============================================================================
// Pagination Definition
// ============================================================================

/// Pagination configuration as written in the config file.
///
/// `type` and `location` stay strings here so that an unknown value fails
/// the construction of its own endpoint rather than the whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDefinition {
    /// Pagination type: none, page, offset, link or token
    #[serde(rename = "type", default = "default_pagination_type")]
    pub kind: String,
    /// Where request parameters are read from: body, query or header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Key names and simulated totals
    #[serde(default)]
    pub options: JsonObject,
}

impl Default for PaginationDefinition {
    fn default() -> Self {
        Self {
            kind: default_pagination_type(),
            location: None,
            options: JsonObject::new(),
        }
    }
}

impl PaginationDefinition {
    /// Create a definition of the given type and location
    pub fn new(kind: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            location: Some(location.into()),
            options: JsonObject::new(),
        }
    }

    /// Add an option
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

fn default_pagination_type() -> String {
    "none".to_string()
}
