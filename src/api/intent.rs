//! Skill intent endpoint
//!
//! POST /

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::Instrument;

use crate::domain::ServiceResponse;
use crate::error::{ApiError, ApiResult};
use crate::middleware::VerifiedRequest;
use crate::state::AppState;

/// Dispatch an authenticated intent request to its handler
///
/// Unknown intents are rejected with 400; a broken message catalog yields
/// 500. Deployment failures are ordinary speech responses.
pub async fn handle_intent(
    State(state): State<Arc<AppState>>,
    VerifiedRequest(request): VerifiedRequest,
) -> ApiResult<Json<ServiceResponse>> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!(
        "intent",
        request_id = %request_id,
        intent = %request.intent_name,
        locale = %request.locale,
    );

    async move {
        let handler = state.registry.get(&request.intent_name).map_err(|e| {
            tracing::warn!(error = %e, "No matching intent handler found");
            ApiError::from(e)
        })?;

        let response = handler.handle(&request).await.map_err(|e| {
            tracing::error!(handler = %handler.name(), error = %e, "Failed to execute the intent handler");
            ApiError::from(e)
        })?;

        tracing::info!(speech = %response.speech_text, "Intent handled");
        Ok(Json(ServiceResponse::from(response)))
    }
    .instrument(span)
    .await
}
