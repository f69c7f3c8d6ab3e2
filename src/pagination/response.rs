//! Response encoding
//!
//! Every request ends in a [`PageResponse`]: either a serialized page or a
//! [`Rejection`] rendered as `{"error": "..."}`.

use crate::types::{JsonObject, JsonValue};
use axum::http::StatusCode;
use bytes::Bytes;
use serde_json::json;
use thiserror::Error;

/// Content type of every paginator response
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Reasons a request is answered without a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Every simulated page has been served
    #[error("record not found")]
    Exhausted,
    /// The body-supplied size is not a JSON number
    #[error("size must be a number")]
    SizeNotNumber,
    /// The body is not a JSON object
    #[error("failed to parse request body")]
    MalformedBody,
    /// The size query parameter is not an integer
    #[error("failed to get size value")]
    InvalidSizeQuery,
    /// The template's response field holds no record
    #[error("invalid response field")]
    InvalidResponseField,
    /// The page link could not be built from the request
    #[error("failed to build page link")]
    InvalidLink,
    /// The page could not be serialized
    #[error("failed to create response object")]
    Encode,
    /// The endpoint's rate limit was hit
    #[error("rate limit exceeded")]
    RateLimited,
}

impl Rejection {
    /// HTTP status for this rejection
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::Exhausted => StatusCode::NOT_FOUND,
            Rejection::SizeNotNumber => StatusCode::BAD_REQUEST,
            Rejection::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Rejection::MalformedBody
            | Rejection::InvalidSizeQuery
            | Rejection::InvalidResponseField
            | Rejection::InvalidLink
            | Rejection::Encode => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON error body
    pub fn body(&self) -> JsonValue {
        json!({ "error": self.to_string() })
    }
}

/// A fully encoded response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Serialized JSON body
    pub body: Bytes,
}

impl PageResponse {
    /// Serialize a page body with `200 OK`
    pub fn encode(body: &JsonObject) -> Result<Self, Rejection> {
        let bytes = serde_json::to_vec(body).map_err(|_| Rejection::Encode)?;
        Ok(Self {
            status: StatusCode::OK,
            body: Bytes::from(bytes),
        })
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body back into JSON
    pub fn json(&self) -> serde_json::Result<JsonValue> {
        serde_json::from_slice(&self.body)
    }
}

impl From<Rejection> for PageResponse {
    fn from(rejection: Rejection) -> Self {
        Self {
            status: rejection.status(),
            body: Bytes::from(rejection.body().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_statuses() {
        assert_eq!(Rejection::Exhausted.status(), StatusCode::NOT_FOUND);
        assert_eq!(Rejection::SizeNotNumber.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Rejection::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            Rejection::MalformedBody.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Rejection::InvalidSizeQuery.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejection_body() {
        let response = PageResponse::from(Rejection::SizeNotNumber);
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json().unwrap(),
            json!({"error": "size must be a number"})
        );

        let response = PageResponse::from(Rejection::Exhausted);
        assert_eq!(response.body, Bytes::from(r#"{"error":"record not found"}"#));
    }

    #[test]
    fn test_encode_page() {
        let mut body = JsonObject::new();
        body.insert("items".to_string(), json!([1, 1]));
        let response = PageResponse::encode(&body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.body, Bytes::from(r#"{"items":[1,1]}"#));
    }
}
