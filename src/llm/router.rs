use std::sync::Arc;

use crate::config::{ProviderConfig, RelayConfig};
use crate::errors::RelayError;
use super::gemini::GeminiProvider;
use super::openrouter::OpenRouterProvider;
use super::provider::ChatProvider;
use super::sambanova::SambaNovaProvider;
use super::transport::Transport;

pub fn create_provider(
    config: &ProviderConfig,
    transport: &Transport,
) -> Result<Arc<dyn ChatProvider>, RelayError> {
    match config.name.as_str() {
        "gemini" => Ok(Arc::new(GeminiProvider::new(config.clone(), transport.clone()))),
        "sambanova" => Ok(Arc::new(SambaNovaProvider::new(config.clone(), transport.clone()))),
        "openrouter" => Ok(Arc::new(OpenRouterProvider::new(config.clone(), transport.clone()))),
        other => Err(RelayError::Config(format!("Unknown AI provider: {other}"))),
    }
}

/// Build the ordered adapter registry for the orchestrator. Unconfigured
/// providers are included so the per-call eligibility filter can log skips.
pub fn build_registry(
    config: &RelayConfig,
    transport: &Transport,
) -> Result<Vec<Arc<dyn ChatProvider>>, RelayError> {
    config
        .providers
        .iter()
        .map(|p| create_provider(p, transport))
        .collect()
}
