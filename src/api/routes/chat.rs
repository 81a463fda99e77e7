use axum::{extract::State, Json};
use tracing::info;

use crate::api::models::{ChatRequest, ChatResponse};
use crate::api::AppState;
use crate::errors::RelayError;
use crate::orchestrator::{ChatOptions, ChatOutcome};

/// POST /api/chat — answer one chat turn via the combined race-then-fallback
/// policy. Total provider failure is still HTTP 200 with `success: false`
/// and the standard fallback text; only malformed requests are errors.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, RelayError> {
    if req.message.trim().is_empty() {
        return Err(RelayError::Config("message must not be empty".into()));
    }

    let context = req.context.unwrap_or_default();
    let opts = ChatOptions {
        provider_order: req.provider_order,
        image: req.image,
        ..ChatOptions::default()
    };

    info!(
        context_len = context.len(),
        has_image = opts.image.is_some(),
        "Chat request"
    );

    let outcome = if req.fast.unwrap_or(false) {
        state.orchestrator.get_response_fast(&req.message, &context, &opts).await
    } else {
        state.orchestrator.race_or_fallback(&req.message, &context, &opts).await
    };

    Ok(Json(ChatResponse::from(&outcome)))
}

impl From<&ChatOutcome> for ChatResponse {
    fn from(outcome: &ChatOutcome) -> Self {
        Self {
            success: outcome.success(),
            response: outcome.text().to_string(),
            provider: outcome.provider().map(str::to_string),
        }
    }
}
