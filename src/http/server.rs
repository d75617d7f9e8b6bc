//! HTTP server setup and the catch-all handler.
//!
//! # Responsibilities
//! - Create an Axum Router whose fallback answers every method and path
//! - Share the immutable [`ServerConfig`] with the handler
//! - Serve the router on a bound listener
//! - Dump requests to the log when verbose

use std::io;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::Response,
    Router,
};
use tracing::instrument::WithSubscriber;

use crate::config::ServerConfig;
use crate::http::request::dump_request;
use crate::http::response::canned_response;
use crate::net::BoundListener;

/// HTTP server answering every request with the configured response.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let router = Self::build_router(Arc::new(config));
        Self { router }
    }

    /// Build the Axum router: no routes, one fallback.
    fn build_router(config: Arc<ServerConfig>) -> Router {
        Router::new().fallback(respond).with_state(config)
    }

    /// The router, for serving on a custom listener or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve requests on `listener` until the task is dropped or accept fails fatally.
    pub async fn run(self, listener: BoundListener) -> io::Result<()> {
        match listener {
            BoundListener::Tcp(listener) => axum::serve(listener, self.router).await,
            #[cfg(unix)]
            BoundListener::Unix(listener) => axum::serve(listener, self.router).await,
        }
    }
}

/// Catch-all handler.
///
/// The response does not depend on the request. In verbose mode the request
/// is dumped on its own task while the response is handed back.
async fn respond(State(config): State<Arc<ServerConfig>>, request: Request) -> Response {
    let response = canned_response(&config);

    if config.verbose {
        tokio::spawn(log_request(request, config.dump_body_limit).with_current_subscriber());
    }

    response
}

async fn log_request(request: Request, limit: usize) {
    match dump_request(request, limit).await {
        Ok(dump) => tracing::info!("{dump}"),
        Err(e) => tracing::error!(error = %e, "Error dumping request"),
    }
}
