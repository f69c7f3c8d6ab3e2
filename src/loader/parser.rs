//! Parser for mock server definitions
//!
//! Parses and validates endpoint definition files. JSON files go through the
//! same YAML parser, JSON being a subset of YAML.

use crate::error::{Error, Result};
use crate::loader::types::{EndpointSpec, ServerDefinition};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load a server definition from a file path
///
/// Relative template paths are resolved against the directory containing
/// the definition file.
pub fn load_config(path: impl AsRef<Path>) -> Result<ServerDefinition> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut def = load_config_from_str(&content)?;

    if let Some(base) = path.parent() {
        for endpoint in &mut def.endpoints {
            let template = &endpoint.response_obj_file_path;
            if !template.as_os_str().is_empty() && template.is_relative() {
                endpoint.response_obj_file_path = base.join(template);
            }
        }
    }

    tracing::info!(
        config = %path.display(),
        endpoints = def.endpoints.len(),
        "configuration loaded"
    );

    Ok(def)
}

/// Load a server definition from a YAML or JSON string
pub fn load_config_from_str(content: &str) -> Result<ServerDefinition> {
    let def: ServerDefinition = serde_yaml::from_str(content)?;

    validate_config(&def)?;
    Ok(def)
}

/// Validate a server definition
fn validate_config(def: &ServerDefinition) -> Result<()> {
    if def.endpoints.is_empty() {
        return Err(Error::config("Configuration must have at least one endpoint"));
    }

    let mut routes = HashSet::new();
    for endpoint in &def.endpoints {
        validate_endpoint(endpoint)?;

        let method = endpoint.method.to_uppercase();
        if !routes.insert((method.clone(), endpoint.path.clone())) {
            return Err(Error::config(format!(
                "Duplicate endpoint: {} {}",
                method, endpoint.path
            )));
        }
    }

    check_route_conflicts(&def.endpoints)
}

/// Reject paths the router cannot hold side by side.
///
/// Two paths conflict when they first differ at a segment that is dynamic
/// in both, e.g. `/items/:id` and `/items/:key`.
pub fn check_route_conflicts(endpoints: &[EndpointSpec]) -> Result<()> {
    let mut paths: Vec<&str> = endpoints.iter().map(|e| e.path.as_str()).collect();
    paths.sort_unstable();
    paths.dedup();

    for (i, a) in paths.iter().enumerate() {
        for b in &paths[i + 1..] {
            if routes_conflict(a, b) {
                return Err(Error::config(format!(
                    "Conflicting endpoint paths: {a} and {b}"
                )));
            }
        }
    }

    Ok(())
}

fn routes_conflict(a: &str, b: &str) -> bool {
    let is_dynamic = |segment: &str| segment.starts_with(':') || segment.starts_with('*');

    a.split('/')
        .zip(b.split('/'))
        .find(|(x, y)| x != y)
        .is_some_and(|(x, y)| is_dynamic(x) && is_dynamic(y))
}

/// Validate a single endpoint definition
fn validate_endpoint(endpoint: &EndpointSpec) -> Result<()> {
    if endpoint.path.is_empty() {
        return Err(Error::config("Endpoint path cannot be empty"));
    }

    if !endpoint.path.starts_with('/') {
        return Err(Error::config(format!(
            "Endpoint path '{}' must start with '/'",
            endpoint.path
        )));
    }

    if endpoint.method.is_empty() {
        return Err(Error::config(format!(
            "Endpoint '{}' method cannot be empty",
            endpoint.path
        )));
    }

    let valid_methods = ["GET", "POST", "PUT", "PATCH", "DELETE"];
    if !valid_methods.contains(&endpoint.method.to_uppercase().as_str()) {
        return Err(Error::config(format!(
            "Endpoint '{}' has invalid HTTP method: {}",
            endpoint.path, endpoint.method
        )));
    }

    Ok(())
}
