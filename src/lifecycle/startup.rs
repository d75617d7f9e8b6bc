//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the configuration from CLI arguments
//! - Bind the listener and start serving on a background task
//! - Block until a termination signal, then release the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Configuration is validated before any socket is bound
//! - No draining: in-flight requests are dropped with the serving task

use thiserror::Error;

use crate::config::{Args, ConfigError, ServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::signals::ShutdownSignal;
use crate::net::{BoundListener, ListenerError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    /// Signal handlers could not be registered.
    #[error("Failed to install signal handlers: {0}")]
    Signal(#[source] std::io::Error),
}

/// Run the process: configure, serve, wait for a signal.
pub async fn run(args: Args) -> Result<(), StartupError> {
    let config = args.into_config()?;
    serve(config).await
}

/// Serve `config` until SIGINT or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<(), StartupError> {
    tracing::debug!(
        status = %config.status,
        body_len = config.body.len(),
        headers = config.headers.len(),
        verbose = config.verbose,
        "Configuration loaded"
    );

    let mut shutdown = ShutdownSignal::install().map_err(StartupError::Signal)?;

    let listener = BoundListener::bind(config.network, &config.address).await?;
    let local_addr = listener.local_addr().map_err(ListenerError::LocalAddr)?;

    let server = HttpServer::new(config);
    let serving = tokio::spawn(async move {
        if let Err(e) = server.run(listener).await {
            tracing::error!(error = %e, "HTTP server stopped");
        }
    });

    tracing::info!("Listening on {local_addr}");

    let signal = shutdown.recv().await;
    tracing::info!(signal, "Shutdown signal received");

    // Dropping the task drops the listener exactly once.
    serving.abort();
    let _ = serving.await;

    Ok(())
}
