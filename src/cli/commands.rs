//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated mock HTTP server
#[derive(Parser, Debug)]
#[command(name = "mockpager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Endpoint configuration file (YAML or JSON)
    #[arg(short, long, global = true, env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Output format for command results
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Log format
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the mock server
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8080")]
        port: u16,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "10")]
        request_timeout_secs: u64,

        /// Skip endpoints that fail construction instead of aborting
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Construct every endpoint and report failures
    Validate,

    /// List configured endpoints
    Routes,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event
    Json,
}
