//! Skill request verification
//!
//! `VerifiedRequest` decodes the assistant's JSON envelope and rejects
//! requests whose application id is not the configured skill id, so
//! handlers only ever see authenticated requests.

use axum::{
    async_trait,
    extract::{FromRequest, Request as HttpRequest},
    Json,
};
use std::sync::Arc;

use crate::domain::{Request, ServiceRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// Decoded and authenticated intent request
///
/// # Example
///
/// ```ignore
/// async fn handler(
///     State(state): State<Arc<AppState>>,
///     VerifiedRequest(request): VerifiedRequest,
/// ) -> impl IntoResponse {
///     // request.intent_name ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct VerifiedRequest(pub Request);

#[async_trait]
impl FromRequest<Arc<AppState>> for VerifiedRequest {
    type Rejection = ApiError;

    async fn from_request(req: HttpRequest, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Json(wire) = Json::<ServiceRequest>::from_request(req, state)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e.body_text(), "Failed to decode request");
                ApiError::bad_request(format!("Failed to decode request: {}", e.body_text()))
            })?;

        let request = Request::from(wire);
        verify_application_id(&request, &state.skill_id)?;
        Ok(VerifiedRequest(request))
    }
}

/// Check the request's application id against the skill id
pub fn verify_application_id(request: &Request, expected_id: &str) -> Result<(), ApiError> {
    if !expected_id.is_empty() && request.session_application_id == expected_id {
        return Ok(());
    }

    tracing::warn!(
        given = %request.session_application_id,
        "Application ID does not match"
    );
    Err(ApiError::bad_request(format!(
        "Application ID does not match. Given: {}, Required: {}",
        request.session_application_id, expected_id
    )))
}
