use std::time::Duration;

use tracing::{debug, warn};

use super::types::{ProviderConfig, RelayConfig, DEFAULT_RACE_TIMEOUT_MS, DEFAULT_TIMEOUT_MS, MAX_CONTEXT_MESSAGES};
use crate::llm::catalog;

/// Build the relay configuration from the process environment.
///
/// Every provider named in `AI_PROVIDER_ORDER` (or the default order) gets a
/// `ProviderConfig`, configured or not. Credential-presence gating happens
/// per call in the orchestrator so that skips stay observable in the logs.
pub fn from_env() -> RelayConfig {
    let order = std::env::var("AI_PROVIDER_ORDER")
        .unwrap_or_else(|_| catalog::DEFAULT_ORDER.to_string());

    let mut providers = Vec::new();
    for id in order.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match catalog::get_provider(id) {
            Some(info) => providers.push(provider_from_env(info)),
            None => warn!(provider = %id, "Unknown provider in AI_PROVIDER_ORDER, ignoring"),
        }
    }

    RelayConfig {
        providers,
        request_timeout: duration_from_env("AI_TIMEOUT_MS", DEFAULT_TIMEOUT_MS),
        race_timeout: duration_from_env("AI_RACE_TIMEOUT_MS", DEFAULT_RACE_TIMEOUT_MS),
        max_context_messages: MAX_CONTEXT_MESSAGES,
    }
}

fn provider_from_env(info: &'static catalog::ProviderInfo) -> ProviderConfig {
    let api_keys: Vec<String> = info
        .key_env_vars
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .filter(|k| !k.trim().is_empty())
        .collect();

    if api_keys.is_empty() {
        debug!(provider = %info.id, "No credentials configured");
    }

    ProviderConfig {
        name: info.id.to_string(),
        api_keys,
        model: std::env::var(info.model_env_var)
            .unwrap_or_else(|_| info.default_model.to_string()),
        base_url: std::env::var(info.base_url_env_var)
            .unwrap_or_else(|_| info.default_base_url.to_string()),
        supports_vision: info.supports_vision,
    }
}

fn duration_from_env(var: &str, default_ms: u64) -> Duration {
    let ms = match std::env::var(var) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = %var, value = %raw, "Invalid timeout value, using default");
            default_ms
        }),
        Err(_) => default_ms,
    };
    Duration::from_millis(ms)
}
