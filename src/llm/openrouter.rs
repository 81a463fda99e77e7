use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::errors::RelayError;
use super::provider::ChatProvider;
use super::transport::Transport;
use super::types::ChatMessage;

pub struct OpenRouterProvider {
    transport: Transport,
    config: ProviderConfig,
}

impl OpenRouterProvider {
    pub fn new(config: ProviderConfig, transport: Transport) -> Self {
        Self { transport, config }
    }
}

fn build_messages(message: &str, context: &[ChatMessage]) -> Vec<Value> {
    let mut messages = Vec::new();
    for entry in context {
        match entry.role.as_str() {
            "system" | "user" | "assistant" => {
                messages.push(json!({"role": entry.role, "content": entry.content}));
            }
            other => debug!(role = %other, "Dropping context entry with unknown role"),
        }
    }
    messages.push(json!({"role": "user", "content": message}));
    messages
}

fn parse_response(data: &Value) -> Result<String, RelayError> {
    if let Some(error) = data.get("error") {
        let msg = error["message"].as_str().unwrap_or("Unknown OpenRouter error");
        return Err(RelayError::Api(msg.to_string()));
    }

    data["choices"][0]["message"]["content"]
        .as_str()
        .map(|t| t.trim().to_string())
        .ok_or_else(|| RelayError::Parse("No choice content in OpenRouter response".into()))
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    async fn chat(
        &self,
        message: &str,
        context: &[ChatMessage],
        _image: Option<&str>,
        timeout: Duration,
    ) -> Result<String, RelayError> {
        let key = self
            .config
            .api_keys
            .first()
            .ok_or_else(|| RelayError::Config("No OpenRouter credentials configured".into()))?;

        let body = json!({
            "model": self.config.model,
            "messages": build_messages(message, context),
            "max_tokens": 4096,
        });

        let url = format!("{}/chat/completions", self.config.base_url);
        let headers = [
            ("Authorization", format!("Bearer {key}")),
            ("HTTP-Referer", "https://chatrelay.dev".to_string()),
        ];
        let data = self.transport.post_json(&url, &headers, &body, timeout).await?;
        parse_response(&data)
    }

    fn name(&self) -> &str {
        "openrouter"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}
