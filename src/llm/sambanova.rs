use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::errors::RelayError;
use super::provider::ChatProvider;
use super::transport::Transport;
use super::types::ChatMessage;

pub struct SambaNovaProvider {
    transport: Transport,
    config: ProviderConfig,
}

impl SambaNovaProvider {
    pub fn new(config: ProviderConfig, transport: Transport) -> Self {
        Self { transport, config }
    }
}

/// SambaNova speaks the OpenAI chat-completions format: `system`, `user`
/// and `assistant` roles pass through unchanged, unknown roles are dropped.
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
        let msg = error["message"].as_str().unwrap_or("Unknown SambaNova error");
        return Err(RelayError::Api(msg.to_string()));
    }

    data["choices"][0]["message"]["content"]
        .as_str()
        .map(|t| t.trim().to_string())
        .ok_or_else(|| RelayError::Parse("No choice content in SambaNova response".into()))
}

#[async_trait]
impl ChatProvider for SambaNovaProvider {
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
            .ok_or_else(|| RelayError::Config("No SambaNova credentials configured".into()))?;

        let body = json!({
            "model": self.config.model,
            "messages": build_messages(message, context),
            "max_tokens": 4096,
        });

        let url = format!("{}/chat/completions", self.config.base_url);
        let headers = [("Authorization", format!("Bearer {key}"))];
        let data = self.transport.post_json(&url, &headers, &body, timeout).await?;
        parse_response(&data)
    }

    fn name(&self) -> &str {
        "sambanova"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_pass_through() {
        let context = vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage { role: "function".into(), content: "x".into(), image: None },
        ];
        let messages = build_messages("next", &context);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3], json!({"role": "user", "content": "next"}));
    }

    #[test]
    fn test_parse_response() {
        let data = json!({"choices": [{"message": {"content": " fine, thanks "}}]});
        assert_eq!(parse_response(&data).unwrap(), "fine, thanks");
    }

    #[test]
    fn test_parse_response_missing_choices() {
        assert!(matches!(
            parse_response(&json!({"choices": []})),
            Err(RelayError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_response_error_object() {
        let data = json!({"error": {"message": "quota exceeded"}});
        match parse_response(&data) {
            Err(RelayError::Api(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
