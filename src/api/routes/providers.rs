use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::models::ProviderStatus;
use crate::api::AppState;

/// GET /api/providers — registry listing for debugging which backends are
/// configured and vision-capable. Credentials themselves are never exposed.
pub async fn list_providers(State(state): State<AppState>) -> Json<Value> {
    let providers: Vec<ProviderStatus> = state
        .orchestrator
        .providers()
        .iter()
        .map(|p| ProviderStatus {
            name: p.name().to_string(),
            configured: p.is_configured(),
            supports_vision: p.supports_vision(),
        })
        .collect();

    Json(json!({ "providers": providers }))
}
