use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// User-safe text returned when every eligible provider failed or none were
/// eligible. Raw per-provider errors stay in the logs.
pub const FALLBACK_MESSAGE: &str =
    "All AI services are currently unavailable. Please try again in a moment.";

pub const CANCELLED_MESSAGE: &str = "The request was cancelled.";

/// Result of one orchestrated chat call. Ordinary provider failures never
/// surface as errors; they collapse into `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Answered { text: String, provider: String },
    /// Every eligible provider failed, or none were eligible
    Unavailable,
    /// The caller's cancellation token fired before any provider answered
    Cancelled,
}

impl ChatOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ChatOutcome::Answered { .. })
    }

    /// Display text for this outcome, safe to show an end user.
    pub fn text(&self) -> &str {
        match self {
            ChatOutcome::Answered { text, .. } => text,
            ChatOutcome::Unavailable => FALLBACK_MESSAGE,
            ChatOutcome::Cancelled => CANCELLED_MESSAGE,
        }
    }

    pub fn provider(&self) -> Option<&str> {
        match self {
            ChatOutcome::Answered { provider, .. } => Some(provider),
            _ => None,
        }
    }
}

/// Per-call options for the orchestrator entry points.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Override of the configured provider attempt order, by name.
    pub provider_order: Option<Vec<String>>,
    /// Image attachment as a data URL. Restricts eligibility to
    /// vision-capable providers.
    pub image: Option<String>,
    /// Per-provider deadline override for this call.
    pub timeout: Option<Duration>,
    /// Caller-imposed cancellation, e.g. tied to a dropped client request.
    pub cancel: Option<CancellationToken>,
}

impl ChatOptions {
    pub fn with_image(data_url: &str) -> Self {
        Self { image: Some(data_url.to_string()), ..Self::default() }
    }
}
