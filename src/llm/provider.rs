use std::time::Duration;

use async_trait::async_trait;

use crate::errors::RelayError;
use super::types::ChatMessage;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one chat turn and return the assistant's reply text, trimmed.
    ///
    /// `context` is an immutable snapshot, oldest first, already truncated
    /// by the orchestrator. `image` is a data URL and is only passed to
    /// adapters that declare vision support.
    async fn chat(
        &self,
        message: &str,
        context: &[ChatMessage],
        image: Option<&str>,
        timeout: Duration,
    ) -> Result<String, RelayError>;

    /// Provider name for logging and attribution
    fn name(&self) -> &str;

    /// Whether image attachments can be forwarded to this backend
    fn supports_vision(&self) -> bool {
        false
    }

    /// Whether at least one credential is present
    fn is_configured(&self) -> bool;
}
