//! API module
//!
//! HTTP handlers and router assembly

pub mod health;
pub mod intent;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the full API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Skill endpoint and landing page share "/"
        .route("/", get(health::website).post(intent::handle_intent))
        // Health & website
        .merge(health::router())
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
