pub mod outcome;

pub use outcome::{ChatOptions, ChatOutcome, CANCELLED_MESSAGE, FALLBACK_MESSAGE};

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::errors::RelayError;
use crate::llm::{self, ChatMessage, ChatProvider, Transport};

/// Decides which adapters to try, in what order or concurrency, and picks
/// the reply to return. Holds the immutable adapter registry; per-call
/// state lives on the stack, so one instance is freely shared across
/// concurrent requests.
pub struct Orchestrator {
    providers: Vec<Arc<dyn ChatProvider>>,
    request_timeout: Duration,
    race_timeout: Duration,
    max_context: usize,
}

impl Orchestrator {
    pub fn new(providers: Vec<Arc<dyn ChatProvider>>, config: &RelayConfig) -> Self {
        Self {
            providers,
            request_timeout: config.request_timeout,
            race_timeout: config.race_timeout,
            max_context: config.max_context_messages,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let transport = Transport::new();
        let providers = llm::build_registry(config, &transport)?;
        Ok(Self::new(providers, config))
    }

    pub fn providers(&self) -> &[Arc<dyn ChatProvider>] {
        &self.providers
    }

    /// Sequential-Fallback: strict configured order, one provider at a
    /// time, each bounded by the request timeout. First success wins; every
    /// failure is logged and absorbed.
    pub async fn get_response(
        &self,
        message: &str,
        context: &[ChatMessage],
        opts: &ChatOptions,
    ) -> ChatOutcome {
        let deadline = opts.timeout.unwrap_or(self.request_timeout);
        let providers = self.eligible(opts.provider_order.as_deref(), opts.image.is_some());
        if providers.is_empty() {
            info!("No eligible providers for this request");
            return ChatOutcome::Unavailable;
        }
        let context = clip_context(context, self.max_context);

        for provider in providers {
            let name = provider.name().to_string();
            let attempt = attempt(provider, message, context, opts.image.as_deref(), deadline);

            let result = match &opts.cancel {
                Some(cancel) => tokio::select! {
                    _ = cancel.cancelled() => {
                        info!("Chat call cancelled by caller");
                        return ChatOutcome::Cancelled;
                    }
                    result = attempt => result,
                },
                None => attempt.await,
            };

            match result {
                Ok(text) => {
                    info!(provider = %name, "Provider answered");
                    return ChatOutcome::Answered { text, provider: name };
                }
                Err(e) => warn!(
                    provider = %name,
                    error_type = e.classify().error_type,
                    error = %e,
                    "Provider failed, falling back"
                ),
            }
        }

        ChatOutcome::Unavailable
    }

    /// Parallel-Race: launch every eligible adapter concurrently, each
    /// bounded by the (shorter) race timeout. The first successful
    /// resolution wins regardless of launch order; the rest are dropped.
    /// Resolves `Unavailable` only after all attempts have rejected.
    pub async fn get_response_fast(
        &self,
        message: &str,
        context: &[ChatMessage],
        opts: &ChatOptions,
    ) -> ChatOutcome {
        let deadline = opts.timeout.unwrap_or(self.race_timeout);
        let providers = self.eligible(opts.provider_order.as_deref(), opts.image.is_some());
        if providers.is_empty() {
            info!("No eligible providers for this request");
            return ChatOutcome::Unavailable;
        }
        let context = clip_context(context, self.max_context);

        let mut attempts: FuturesUnordered<_> = providers
            .into_iter()
            .map(|provider| {
                let name = provider.name().to_string();
                let image = opts.image.as_deref();
                async move { (name, attempt(provider, message, context, image, deadline).await) }
            })
            .collect();

        loop {
            let next = match &opts.cancel {
                Some(cancel) => tokio::select! {
                    _ = cancel.cancelled() => {
                        info!("Chat race cancelled by caller");
                        return ChatOutcome::Cancelled;
                    }
                    next = attempts.next() => next,
                },
                None => attempts.next().await,
            };

            match next {
                Some((name, Ok(text))) => {
                    info!(provider = %name, "Provider won the race");
                    return ChatOutcome::Answered { text, provider: name };
                }
                Some((name, Err(e))) => warn!(
                    provider = %name,
                    error_type = e.classify().error_type,
                    error = %e,
                    "Provider lost the race"
                ),
                None => return ChatOutcome::Unavailable,
            }
        }
    }

    /// Combined policy: race first with the short timeout to bound typical
    /// latency, then fall back to the full sequential chain with the long
    /// default if the fast path came up empty.
    pub async fn race_or_fallback(
        &self,
        message: &str,
        context: &[ChatMessage],
        opts: &ChatOptions,
    ) -> ChatOutcome {
        match self.get_response_fast(message, context, opts).await {
            ChatOutcome::Unavailable => {
                info!("Race yielded no success, retrying sequentially");
                let slow = ChatOptions { timeout: None, ..opts.clone() };
                self.get_response(message, context, &slow).await
            }
            outcome => outcome,
        }
    }

    /// Resolve the attempt order and drop ineligible providers. A provider
    /// is eligible only when its credentials are configured and, for image
    /// requests, it supports vision. Skipped providers are never invoked.
    fn eligible(
        &self,
        order: Option<&[String]>,
        has_image: bool,
    ) -> Vec<Arc<dyn ChatProvider>> {
        let ordered: Vec<Arc<dyn ChatProvider>> = match order {
            Some(names) => names
                .iter()
                .filter_map(|name| {
                    let found = self.providers.iter().find(|p| p.name() == name.as_str());
                    if found.is_none() {
                        debug!(provider = %name, "Unknown provider in order override, ignoring");
                    }
                    found.cloned()
                })
                .collect(),
            None => self.providers.clone(),
        };

        ordered
            .into_iter()
            .filter(|provider| {
                if !provider.is_configured() {
                    info!(provider = provider.name(), "Skipping provider: missing credentials");
                    return false;
                }
                if has_image && !provider.supports_vision() {
                    info!(provider = provider.name(), "Skipping provider: no vision support");
                    return false;
                }
                true
            })
            .collect()
    }
}

/// One bounded adapter call. The outer timeout covers the whole adapter
/// invocation, credential rotation included, and aborts the pending HTTP
/// request on expiry.
async fn attempt(
    provider: Arc<dyn ChatProvider>,
    message: &str,
    context: &[ChatMessage],
    image: Option<&str>,
    deadline: Duration,
) -> Result<String, RelayError> {
    match tokio::time::timeout(deadline, provider.chat(message, context, image, deadline)).await {
        Ok(result) => result,
        Err(_) => Err(RelayError::Timeout(format!(
            "{} did not answer within {}ms",
            provider.name(),
            deadline.as_millis()
        ))),
    }
}

fn clip_context(context: &[ChatMessage], max: usize) -> &[ChatMessage] {
    &context[context.len().saturating_sub(max)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_context_keeps_most_recent() {
        let context: Vec<ChatMessage> = (0..15)
            .map(|i| ChatMessage::user(&format!("m{i}")))
            .collect();
        let clipped = clip_context(&context, 10);
        assert_eq!(clipped.len(), 10);
        assert_eq!(clipped[0].content, "m5");
        assert_eq!(clipped[9].content, "m14");
    }

    #[test]
    fn test_clip_context_short_history_untouched() {
        let context = vec![ChatMessage::user("only one")];
        assert_eq!(clip_context(&context, 10).len(), 1);
    }
}
