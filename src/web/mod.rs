/*!
 * Web boundary for the translation service.
 *
 * Exposes the model routes, the fallback translate route and the health
 * endpoint over axum. The server binds only after the model registry has
 * attempted every model, so health never reports a partially initialized
 * process.
 */

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::create_routes;
pub use types::*;

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use axum::Router;

use crate::app_config::ServerConfig;

/// Web server for the translation service
pub struct WebServer {
    config: ServerConfig,
}

impl WebServer {
    /// Create a new web server
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Build the full router with middleware over the given state.
    ///
    /// Public so integration tests can drive the exact production router.
    pub fn build_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
        create_routes()
            .with_state(state)
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(request_timeout))
    }

    /// Bind the listener and serve until shutdown
    pub async fn start(&self, state: Arc<AppState>) -> Result<()> {
        let app = Self::build_router(
            state,
            Duration::from_secs(self.config.request_timeout_secs),
        );

        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind server to {}", addr))?;

        info!("Listening on http://{}", addr);
        axum::serve(listener, app)
            .await
            .context("Server error")?;

        Ok(())
    }
}
