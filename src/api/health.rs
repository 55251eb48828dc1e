//! Health check and landing page
//!
//! GET /health, GET /index.html (GET / is wired in the root router)

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::config::env::constants::{SERVICE_NAME, VERSION};
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: String,
    started_at: String,
    intents: Vec<String>,
    projects: Vec<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/index.html", get(website))
}

/// Health check - status, version, registered intents and projects
///
/// No authentication
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: VERSION,
        timestamp: chrono::Utc::now().to_rfc3339(),
        started_at: state.started_at.to_rfc3339(),
        intents: state.registry.names().into_iter().map(String::from).collect(),
        projects: state.project_names.clone(),
    })
}

/// Embedded landing page
pub async fn website() -> Html<&'static str> {
    Html(INDEX_HTML)
}
