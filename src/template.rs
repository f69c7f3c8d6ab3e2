//! Response templates
//!
//! A template is a JSON object loaded once per endpoint. Exactly one of its
//! fields, the *response field*, holds the array that gets paginated; its
//! first element is the record replicated into every page. All other fields
//! pass through unchanged.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use std::fs;
use std::path::Path;

/// Read a template file and parse it as a JSON object
pub fn load_template(path: impl AsRef<Path>) -> Result<JsonObject> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if path.as_os_str().is_empty() {
        return Err(Error::invalid_path(display, "empty file path"));
    }

    let content =
        fs::read_to_string(path).map_err(|e| Error::invalid_path(&display, e.to_string()))?;

    match serde_json::from_str::<JsonValue>(&content) {
        Ok(JsonValue::Object(object)) => Ok(object),
        Ok(other) => Err(Error::invalid_template(
            display,
            format!("expected a JSON object, found {}", json_kind(&other)),
        )),
        Err(e) => Err(Error::invalid_template(display, e.to_string())),
    }
}

/// Pick the field of `template` whose array is paginated.
///
/// An explicit field must exist and hold an array. Without one, the first
/// array-valued field in document order is used.
pub fn resolve_response_field(template: &JsonObject, explicit: Option<&str>) -> Result<String> {
    if let Some(field) = explicit.filter(|f| !f.is_empty()) {
        return match template.get(field) {
            Some(JsonValue::Array(_)) => Ok(field.to_string()),
            _ => Err(Error::InvalidResponseField {
                field: field.to_string(),
            }),
        };
    }

    template
        .iter()
        .find(|(_, value)| value.is_array())
        .map(|(key, _)| key.clone())
        .ok_or(Error::MissingResponseField)
}

/// A loaded template with its response field resolved
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    object: JsonObject,
    response_field: String,
}

impl TemplateDocument {
    /// Load a template file and resolve its response field
    pub fn load(path: impl AsRef<Path>, response_field: Option<&str>) -> Result<Self> {
        let object = load_template(path)?;
        Self::from_object(object, response_field)
    }

    /// Build a document from an already parsed template
    pub fn from_object(object: JsonObject, response_field: Option<&str>) -> Result<Self> {
        let response_field = resolve_response_field(&object, response_field)?;

        let has_record = object
            .get(&response_field)
            .and_then(JsonValue::as_array)
            .is_some_and(|records| !records.is_empty());
        if !has_record {
            return Err(Error::EmptyResponseField {
                field: response_field,
            });
        }

        Ok(Self {
            object,
            response_field,
        })
    }

    /// Name of the paginated field
    pub fn response_field(&self) -> &str {
        &self.response_field
    }

    /// The template object as loaded
    pub fn object(&self) -> &JsonObject {
        &self.object
    }

    /// Whether the template has a top-level field named `key`
    pub fn contains_field(&self, key: &str) -> bool {
        self.object.contains_key(key)
    }

    /// The record replicated into every page
    pub fn record(&self) -> Option<&JsonValue> {
        self.object
            .get(&self.response_field)
            .and_then(JsonValue::as_array)
            .and_then(|records| records.first())
    }

    /// Build a page body holding `count` copies of the template record.
    ///
    /// Returns `None` when the response field no longer holds a record.
    pub fn render(&self, count: usize) -> Option<JsonObject> {
        let record = self.record()?;
        let page: Vec<JsonValue> = std::iter::repeat(record).take(count).cloned().collect();

        let mut body = self.object.clone();
        body.insert(self.response_field.clone(), JsonValue::Array(page));
        Some(body)
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    fn object(value: JsonValue) -> JsonObject {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn write_template(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_template() {
        let file = write_template(r#"{"id": 1, "items": [{"x": 1}]}"#);
        let template = load_template(file.path()).unwrap();
        assert_eq!(template["id"], json!(1));
        assert_eq!(template["items"], json!([{"x": 1}]));
    }

    #[test]
    fn test_load_template_empty_path() {
        let err = load_template("").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert!(err.to_string().contains("empty file path"));
    }

    #[test]
    fn test_load_template_missing_file() {
        let err = load_template("/no/such/template.json").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_load_template_invalid_json() {
        let file = write_template("{not json");
        let err = load_template(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate { .. }));
    }

    #[test]
    fn test_load_template_not_an_object() {
        let file = write_template("[1, 2, 3]");
        let err = load_template(file.path()).unwrap_err();
        assert!(err.to_string().contains("expected a JSON object, found an array"));
    }

    #[test]
    fn test_resolve_first_array_field() {
        let template = object(json!({"id": 1, "items": [{"x": 1}]}));
        assert_eq!(resolve_response_field(&template, None).unwrap(), "items");
    }

    #[test]
    fn test_resolve_uses_document_order() {
        let template = object(json!({"meta": {}, "zeta": [1], "alpha": [2]}));
        assert_eq!(resolve_response_field(&template, None).unwrap(), "zeta");
    }

    #[test]
    fn test_resolve_explicit_field() {
        let template = object(json!({"first": [1], "second": [2]}));
        assert_eq!(
            resolve_response_field(&template, Some("second")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_resolve_explicit_field_not_array() {
        let template = object(json!({"items": {"x": 1}}));
        let err = resolve_response_field(&template, Some("items")).unwrap_err();
        assert!(matches!(err, Error::InvalidResponseField { field } if field == "items"));
    }

    #[test]
    fn test_resolve_explicit_field_absent() {
        let template = object(json!({"items": [1]}));
        let err = resolve_response_field(&template, Some("records")).unwrap_err();
        assert!(matches!(err, Error::InvalidResponseField { .. }));
    }

    #[test]
    fn test_resolve_no_array_field() {
        let template = object(json!({"id": 1, "name": "x"}));
        let err = resolve_response_field(&template, None).unwrap_err();
        assert!(matches!(err, Error::MissingResponseField));
    }

    #[test]
    fn test_document_rejects_empty_array() {
        let err = TemplateDocument::from_object(object(json!({"items": []})), None).unwrap_err();
        assert!(matches!(err, Error::EmptyResponseField { .. }));
    }

    #[test]
    fn test_render_replicates_first_record() {
        let doc = TemplateDocument::from_object(
            object(json!({"total": 9, "items": [{"id": 1}, {"id": 2}]})),
            None,
        )
        .unwrap();

        let body = doc.render(3).unwrap();
        assert_eq!(
            JsonValue::Object(body),
            json!({"total": 9, "items": [{"id": 1}, {"id": 1}, {"id": 1}]})
        );

        // The loaded template is left untouched
        assert_eq!(doc.object()["items"], json!([{"id": 1}, {"id": 2}]));
    }

    #[test]
    fn test_render_zero_records() {
        let doc = TemplateDocument::from_object(object(json!({"items": [1]})), None).unwrap();
        assert_eq!(doc.render(0).unwrap()["items"], json!([]));
    }
}
