//! Transport-agnostic request view
//!
//! Paginators only see the parts of an inbound request they read from:
//! path, query string, headers and body.

use super::response::Rejection;
use super::types::ParamLocation;
use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use axum::http::header::{HeaderName, HeaderValue, HOST};
use axum::http::{HeaderMap, Uri};
use bytes::Bytes;
use url::Url;

/// Header set by proxies terminating TLS
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The parts of an HTTP request a paginator reads
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Request path, without query
    pub path: String,
    /// Raw query string, without the leading `?`
    pub query: Option<String>,
    /// Request headers
    pub headers: HeaderMap,
    /// Raw request body
    pub body: Bytes,
    /// Whether the request arrived over TLS
    pub tls: bool,
}

impl PageRequest {
    /// Create a request for `path` with no query, headers or body
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Build a request from its URI, headers and body
    pub fn from_parts(uri: &Uri, mut headers: HeaderMap, body: Bytes) -> Self {
        if !headers.contains_key(HOST) {
            if let Some(value) = uri
                .authority()
                .and_then(|a| HeaderValue::from_str(a.as_str()).ok())
            {
                headers.insert(HOST, value);
            }
        }

        Self {
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers,
            body,
            tls: uri.scheme_str() == Some("https"),
        }
    }

    /// Set the raw query string
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add a header; invalid names or values are ignored
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set the raw body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// First value of a query parameter, percent-decoded
    pub fn query_param(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `https` when the request came over TLS or through a TLS-terminating
    /// proxy, `http` otherwise
    pub fn scheme(&self) -> &'static str {
        let forwarded_https = self
            .header(FORWARDED_PROTO)
            .is_some_and(|proto| proto.eq_ignore_ascii_case("https"));

        if self.tls || forwarded_https {
            "https"
        } else {
            "http"
        }
    }

    /// Host the request was addressed to
    pub fn host(&self) -> &str {
        self.header(HOST.as_str()).unwrap_or("localhost")
    }

    /// Absolute URL of this request with query parameters sorted by key
    pub fn canonical_url(&self) -> Result<String> {
        let mut url = Url::parse(&format!("{}://{}", self.scheme(), self.host()))?;
        url.set_path(&self.path);

        let mut pairs: Vec<(String, String)> = self
            .query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        if !pairs.is_empty() {
            // Stable sort keeps repeated keys in request order
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url.to_string())
    }
}

/// Read the requested page size from `location`.
///
/// Body: a non-numeric value is rejected, a missing one falls back to
/// `default`. Header: anything but a positive integer falls back to
/// `default`. Query: a present value must parse as an integer.
pub fn requested_size(
    request: &PageRequest,
    location: ParamLocation,
    key: &str,
    default: i64,
) -> std::result::Result<i64, Rejection> {
    match location {
        ParamLocation::Body => {
            let body: JsonObject =
                serde_json::from_slice(&request.body).map_err(|_| Rejection::MalformedBody)?;
            match body.get(key) {
                Some(value) => numeric_size(value).ok_or(Rejection::SizeNotNumber),
                None => Ok(default),
            }
        }
        ParamLocation::Header => Ok(request
            .header(key)
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(default)),
        ParamLocation::Query => match request.query_param(key) {
            Some(value) => value
                .parse::<i64>()
                .map_err(|_| Rejection::InvalidSizeQuery),
            None => Ok(default),
        },
    }
}

/// Interpret any JSON number as a size, truncating fractions
fn numeric_size(value: &JsonValue) -> Option<i64> {
    if let Some(size) = value.as_i64() {
        return Some(size);
    }
    if let Some(size) = value.as_u64() {
        return Some(i64::try_from(size).unwrap_or(i64::MAX));
    }
    value.as_f64().map(|size| size as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_size() {
        assert_eq!(numeric_size(&json!(10)), Some(10));
        assert_eq!(numeric_size(&json!(-3)), Some(-3));
        assert_eq!(numeric_size(&json!(7.9)), Some(7));
        assert_eq!(numeric_size(&json!(u64::MAX)), Some(i64::MAX));
        assert_eq!(numeric_size(&json!("ten")), None);
        assert_eq!(numeric_size(&json!(null)), None);
        assert_eq!(numeric_size(&json!(true)), None);
    }

    #[test]
    fn test_query_param_decoding() {
        let request = PageRequest::new("/x").with_query("name=a%20b&limit=3&limit=4");
        assert_eq!(request.query_param("name").as_deref(), Some("a b"));
        assert_eq!(request.query_param("limit").as_deref(), Some("3"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_scheme_detection() {
        let request = PageRequest::new("/x");
        assert_eq!(request.scheme(), "http");

        let forwarded = PageRequest::new("/x").with_header("X-Forwarded-Proto", "https");
        assert_eq!(forwarded.scheme(), "https");

        let tls = PageRequest {
            tls: true,
            ..PageRequest::new("/x")
        };
        assert_eq!(tls.scheme(), "https");
    }

    #[test]
    fn test_canonical_url_sorts_query() {
        let request = PageRequest::new("/things")
            .with_query("b=2&a=1")
            .with_header("Host", "api.test:8080");
        assert_eq!(
            request.canonical_url().unwrap(),
            "http://api.test:8080/things?a=1&b=2"
        );
    }

    #[test]
    fn test_canonical_url_without_query() {
        let request = PageRequest::new("/things").with_header("Host", "api.test");
        assert_eq!(request.canonical_url().unwrap(), "http://api.test/things");
    }

    #[test]
    fn test_from_parts_uses_uri_authority() {
        let uri: Uri = "https://api.test/items?page=2".parse().unwrap();
        let request = PageRequest::from_parts(&uri, HeaderMap::new(), Bytes::new());
        assert_eq!(request.path, "/items");
        assert_eq!(request.query.as_deref(), Some("page=2"));
        assert_eq!(request.host(), "api.test");
        assert_eq!(request.scheme(), "https");
    }
}
