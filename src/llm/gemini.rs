use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::errors::RelayError;
use super::provider::ChatProvider;
use super::transport::Transport;
use super::types::{ChatMessage, ImageData};

pub struct GeminiProvider {
    transport: Transport,
    config: ProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig, transport: Transport) -> Self {
        Self { transport, config }
    }
}

/// Build the generateContent payload. System entries fold into
/// `systemInstruction`, assistant maps to Gemini's `model` role, unknown
/// roles are dropped. Image data URLs become `inlineData` parts, for the
/// current message and for prior context entries that carry one.
fn build_request(message: &str, context: &[ChatMessage], image: Option<&str>) -> Value {
    let mut contents = Vec::new();
    let mut system_texts: Vec<&str> = Vec::new();

    for entry in context {
        let role = match entry.role.as_str() {
            "user" => "user",
            "assistant" => "model",
            "system" => {
                if entry.image.is_some() {
                    debug!("Dropping image attachment on system context entry");
                }
                system_texts.push(&entry.content);
                continue;
            }
            other => {
                debug!(role = %other, "Dropping context entry with unknown role");
                continue;
            }
        };

        let mut parts = vec![json!({"text": entry.content})];
        if let Some(data_url) = &entry.image {
            let img = ImageData::from_data_url(data_url);
            parts.push(json!({"inlineData": {"mimeType": img.mime_type, "data": img.data}}));
        }
        contents.push(json!({"role": role, "parts": parts}));
    }

    let mut parts = vec![json!({"text": message})];
    if let Some(data_url) = image {
        let img = ImageData::from_data_url(data_url);
        parts.push(json!({"inlineData": {"mimeType": img.mime_type, "data": img.data}}));
    }
    contents.push(json!({"role": "user", "parts": parts}));

    let mut body = json!({
        "contents": contents,
        "generationConfig": {
            "maxOutputTokens": 8192,
        }
    });
    if !system_texts.is_empty() {
        body["systemInstruction"] = json!({"parts": [{"text": system_texts.join("\n")}]});
    }
    body
}

fn parse_response(data: &Value) -> Result<String, RelayError> {
    if let Some(error) = data.get("error") {
        let msg = error["message"].as_str().unwrap_or("Unknown Gemini error");
        return Err(RelayError::Api(msg.to_string()));
    }

    data["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|t| t.trim().to_string())
        .ok_or_else(|| RelayError::Parse("No candidate text in Gemini response".into()))
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn chat(
        &self,
        message: &str,
        context: &[ChatMessage],
        image: Option<&str>,
        timeout: Duration,
    ) -> Result<String, RelayError> {
        let body = build_request(message, context, image);

        // Rotate through the configured key slots; only the last error is
        // surfaced once all are exhausted.
        let mut last_error = None;
        for (slot, key) in self.config.api_keys.iter().enumerate() {
            let url = format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                self.config.base_url, self.config.model, key
            );

            match self.transport.post_json(&url, &[], &body, timeout).await {
                Ok(data) => match parse_response(&data) {
                    Ok(text) => return Ok(text),
                    Err(e) => {
                        warn!(
                            provider = "gemini",
                            key_slot = slot,
                            error_type = e.classify().error_type,
                            error = %e,
                            "Gemini key failed, rotating"
                        );
                        last_error = Some(e);
                    }
                },
                Err(e) => {
                    warn!(
                        provider = "gemini",
                        key_slot = slot,
                        error_type = e.classify().error_type,
                        error = %e,
                        "Gemini key failed, rotating"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| RelayError::Config("No Gemini credentials configured".into())))
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn supports_vision(&self) -> bool {
        true
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_URL: &str = "data:image/png;base64,aGVsbG8=";

    #[test]
    fn test_role_mapping_buckets() {
        let context = vec![
            ChatMessage::system("be kind"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage { role: "tool".into(), content: "ignored".into(), image: None },
        ];
        let body = build_request("how are you?", &context, None);

        let contents = body["contents"].as_array().unwrap();
        // user + assistant from context, plus the current message; system
        // folded, unknown role dropped
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "how are you?");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be kind");
    }

    #[test]
    fn test_no_system_instruction_when_absent() {
        let body = build_request("hi", &[], None);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_image_attached_to_current_message() {
        let body = build_request("what is this?", &[], Some(PNG_URL));
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "aGVsbG8=");
    }

    #[test]
    fn test_image_on_prior_context_entry_forwarded() {
        let context = vec![ChatMessage::user("earlier image").with_image(PNG_URL)];
        let body = build_request("and now?", &context, None);
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[1].get("inlineData").is_some());
    }

    #[test]
    fn test_image_on_system_entry_dropped() {
        let context = vec![ChatMessage::system("rules").with_image(PNG_URL)];
        let body = build_request("hi", &context, None);
        // System text still folds in, the attachment does not appear anywhere
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "rules");
        let serialized = body.to_string();
        assert!(!serialized.contains("inlineData"));
    }

    #[test]
    fn test_parse_response_success_trims() {
        let data = json!({
            "candidates": [{"content": {"parts": [{"text": "  hello there \n"}]}}]
        });
        assert_eq!(parse_response(&data).unwrap(), "hello there");
    }

    #[test]
    fn test_parse_response_api_error_preserves_message() {
        let data = json!({"error": {"message": "API key expired"}});
        match parse_response(&data) {
            Err(RelayError::Api(msg)) => assert_eq!(msg, "API key expired"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_response_missing_candidates() {
        let data = json!({"candidates": []});
        assert!(matches!(parse_response(&data), Err(RelayError::Parse(_))));
    }
}
