//! Error types for mockpager
//!
//! This module defines the error hierarchy for configuration loading and
//! paginator construction. All public APIs return `Result<T, Error>` where
//! Error is defined here.
//!
//! Request-time failures never surface as `Error`; they are
//! [`Rejection`](crate::pagination::Rejection) values mapped straight to an
//! HTTP status.

use thiserror::Error;

/// The main error type for mockpager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Invalid template path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("Invalid template '{path}': {message}")]
    InvalidTemplate { path: String, message: String },

    #[error("Response field '{field}' is missing or not an array")]
    InvalidResponseField { field: String },

    #[error("Template has no array field to paginate")]
    MissingResponseField,

    #[error("Response field '{field}' has no template record")]
    EmptyResponseField { field: String },

    #[error("Link key '{key}' is not a field of the template")]
    InvalidLinkKey { key: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Unsupported pagination type: {kind}")]
    UnsupportedPaginationType { kind: String },

    #[error("Endpoint {method} {path}: {source}")]
    Endpoint {
        method: String,
        path: String,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // Server Errors
    // ============================================================================
    #[error("Server error: {message}")]
    Server { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid template path error
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid template error
    pub fn invalid_template(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Wrap an error with the identity of the endpoint it belongs to
    pub fn for_endpoint(self, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Endpoint {
            method: method.into(),
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error aborts the construction of a single endpoint
    /// (as opposed to the whole configuration)
    pub fn is_construction_error(&self) -> bool {
        match self {
            Error::InvalidPath { .. }
            | Error::InvalidTemplate { .. }
            | Error::InvalidResponseField { .. }
            | Error::MissingResponseField
            | Error::EmptyResponseField { .. }
            | Error::InvalidLinkKey { .. }
            | Error::UnsupportedPaginationType { .. }
            | Error::InvalidConfigValue { .. } => true,
            Error::Endpoint { source, .. } => source.is_construction_error(),
            _ => false,
        }
    }
}

/// Result type alias for mockpager
pub type Result<T> = std::result::Result<T, Error>;
