use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::RelayError;

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            RelayError::Config(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            RelayError::Authentication(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            RelayError::RateLimit(_) => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            RelayError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
