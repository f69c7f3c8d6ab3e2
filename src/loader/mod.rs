//! Configuration loader module
//!
//! Parse mock endpoint definitions from YAML or JSON files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `ServerDefinition` - The list of endpoints to mock
//! - `EndpointSpec` - One endpoint: route, pagination and response template
//! - Parsing with validation of routes and methods

mod parser;
mod types;

pub use parser::{check_route_conflicts, load_config, load_config_from_str};
pub use types::{EndpointSpec, PaginationDefinition, ServerDefinition};
