//! Route definitions for the web boundary

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::web::{handlers, types::AppState};

/// Create the service routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/translate/:model", post(handlers::translate_model))
        .route("/translate", post(handlers::translate_fallback))
        .route("/health", get(handlers::health))
}
