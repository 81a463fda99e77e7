use serde::{Deserialize, Serialize};

/// One entry of conversation context, oldest first. Roles other than
/// `system`, `user` and `assistant` are dropped during adapter role-mapping
/// rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    /// Optional image attachment as a `data:<mime>;base64,<payload>` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self { role: "system".to_string(), content: content.to_string(), image: None }
    }
    pub fn user(content: &str) -> Self {
        Self { role: "user".to_string(), content: content.to_string(), image: None }
    }
    pub fn assistant(content: &str) -> Self {
        Self { role: "assistant".to_string(), content: content.to_string(), image: None }
    }

    pub fn with_image(mut self, data_url: &str) -> Self {
        self.image = Some(data_url.to_string());
        self
    }
}

/// Decoded image attachment: mime type plus the base64 payload as it goes
/// onto the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub data: String,
}

impl ImageData {
    /// Split a `data:<mime>;base64,<payload>` URL. Falls back to
    /// `image/jpeg` with the whole input as payload when the prefix cannot
    /// be parsed.
    pub fn from_data_url(url: &str) -> Self {
        if let Some(rest) = url.strip_prefix("data:") {
            if let Some((mime, payload)) = rest.split_once(";base64,") {
                if !mime.is_empty() {
                    return Self {
                        mime_type: mime.to_string(),
                        data: payload.to_string(),
                    };
                }
                return Self { mime_type: "image/jpeg".to_string(), data: payload.to_string() };
            }
        }
        Self {
            mime_type: "image/jpeg".to_string(),
            data: url.to_string(),
        }
    }
}
