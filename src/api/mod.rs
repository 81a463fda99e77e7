pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::errors::RelayError;
use crate::orchestrator::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

pub fn create_app_state(config: &RelayConfig) -> Result<AppState, RelayError> {
    Ok(AppState {
        orchestrator: Arc::new(Orchestrator::from_config(config)?),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/chat", axum::routing::post(routes::chat::chat))
        .route("/api/providers", axum::routing::get(routes::providers::list_providers))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
