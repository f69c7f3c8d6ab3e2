//! CLI module
//!
//! Command-line interface for the mock server.
//!
//! # Commands
//!
//! - `serve` - Start the mock server
//! - `validate` - Construct every endpoint and report failures
//! - `routes` - List configured endpoints

mod commands;
mod runner;

pub use commands::{Cli, Commands, LogFormat, OutputFormat};
pub use runner::Runner;
