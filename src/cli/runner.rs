//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Error, Result};
use crate::loader::{load_config, ServerDefinition};
use crate::server::{serve, RegisteredEndpoint, ServerConfig, StartupPolicy};
use serde_json::{json, Value};
use std::time::Duration;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve {
                host,
                port,
                request_timeout_secs,
                skip_invalid,
            } => {
                let def = self.load_config()?;
                let config = ServerConfig {
                    host: host.clone(),
                    port: *port,
                    request_timeout: Duration::from_secs(*request_timeout_secs),
                    policy: if *skip_invalid {
                        StartupPolicy::SkipInvalid
                    } else {
                        StartupPolicy::Abort
                    },
                };
                serve(&def, &config).await
            }
            Commands::Validate => self.validate(),
            Commands::Routes => self.routes(),
        }
    }

    /// Load endpoint configuration
    fn load_config(&self) -> Result<ServerDefinition> {
        let path = self.cli.config.as_ref().ok_or_else(|| {
            Error::config("Configuration file not specified (use -c flag or CONFIG_PATH)")
        })?;
        load_config(path)
    }

    /// Construct every endpoint, one result line each
    fn validate(&self) -> Result<()> {
        let def = self.load_config()?;
        let mut failed = 0usize;

        for spec in &def.endpoints {
            let status = match RegisteredEndpoint::from_spec(spec) {
                Ok(endpoint) => json!({
                    "method": endpoint.method.as_str(),
                    "path": endpoint.path,
                    "type": endpoint.paginator.kind().to_string(),
                    "status": "ok",
                }),
                Err(e) => {
                    failed += 1;
                    json!({
                        "method": spec.method.to_uppercase(),
                        "path": spec.path,
                        "type": spec.pagination.kind,
                        "status": "error",
                        "error": e.to_string(),
                    })
                }
            };
            self.output_message(&status);
        }

        if failed > 0 {
            return Err(Error::config(format!(
                "{failed} of {} endpoints failed validation",
                def.endpoints.len()
            )));
        }
        Ok(())
    }

    /// List configured endpoints without constructing them
    fn routes(&self) -> Result<()> {
        let def = self.load_config()?;

        for spec in &def.endpoints {
            self.output_message(&json!({
                "method": spec.method.to_uppercase(),
                "path": spec.path,
                "type": spec.pagination.kind,
                "location": spec.pagination.location.as_deref().unwrap_or("query"),
                "template": spec.response_obj_file_path.display().to_string(),
                "rateLimit": spec.rate_limit,
            }));
        }
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
