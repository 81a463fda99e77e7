use serde::{Deserialize, Serialize};

use crate::llm::ChatMessage;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: Option<Vec<ChatMessage>>,
    /// Image attachment as a data URL
    pub image: Option<String>,
    /// Override of the configured provider attempt order
    pub provider_order: Option<Vec<String>>,
    /// Use only the parallel fast path instead of the combined policy
    pub fast: Option<bool>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
    pub supports_vision: bool,
}
