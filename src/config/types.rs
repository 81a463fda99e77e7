use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Static configuration for one AI backend. Built once at startup from the
/// environment and immutable afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub name: String,
    /// Credential slots, tried in order by the adapter. Empty means the
    /// provider is not configured and must never be attempted.
    pub api_keys: Vec<String>,
    pub model: String,
    pub base_url: String,
    pub supports_vision: bool,
}

impl ProviderConfig {
    pub fn is_configured(&self) -> bool {
        self.api_keys.iter().any(|k| !k.is_empty())
    }
}

/// Top-level relay configuration. Read-only after startup; shared freely
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Provider configs in the configured attempt order.
    pub providers: Vec<ProviderConfig>,
    /// Per-provider deadline for the sequential fallback path.
    pub request_timeout: Duration,
    /// Shorter per-provider deadline for the parallel race path.
    pub race_timeout: Duration,
    /// Context entries are truncated to this many most-recent messages
    /// before any provider sees them.
    pub max_context_messages: usize,
}

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RACE_TIMEOUT_MS: u64 = 8_000;
pub const MAX_CONTEXT_MESSAGES: usize = 10;

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            race_timeout: Duration::from_millis(DEFAULT_RACE_TIMEOUT_MS),
            max_context_messages: MAX_CONTEXT_MESSAGES,
        }
    }
}
