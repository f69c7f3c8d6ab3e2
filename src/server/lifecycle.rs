//! Server lifecycle: bind, serve, shut down on signal

use super::router::{build_router, register_endpoints, StartupPolicy};
use crate::error::{Error, Result};
use crate::loader::ServerDefinition;
use std::time::Duration;
use tokio::net::TcpListener;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Requests running longer than this are answered with 408
    pub request_timeout: Duration,
    /// Handling of endpoints that fail construction
    pub policy: StartupPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(10),
            policy: StartupPolicy::Abort,
        }
    }
}

/// Start the mock server and run until Ctrl-C or SIGTERM
pub async fn serve(def: &ServerDefinition, config: &ServerConfig) -> Result<()> {
    let endpoints = register_endpoints(def, config.policy)?;
    let app = build_router(&endpoints, config.request_timeout);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::server(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!(
        endpoints = endpoints.len(),
        "Starting mock server on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Server shutting down gracefully...");
}
