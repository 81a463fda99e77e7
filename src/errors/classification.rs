use super::types::RelayError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl RelayError {
    /// Classify this error for structured logging and to decide whether a
    /// different credential or provider is worth trying.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable: another key or another provider may still succeed
            RelayError::RateLimit(_) => ErrorClassification {
                error_type: "RateLimitError",
                retryable: true,
            },
            RelayError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            RelayError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            RelayError::Api(_) => ErrorClassification {
                error_type: "ApiError",
                retryable: true,
            },
            RelayError::Parse(_) => ErrorClassification {
                error_type: "ParseError",
                retryable: true,
            },
            RelayError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                retryable: true,
            },

            // Non-retryable: the call itself is malformed
            RelayError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },

            RelayError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },
            RelayError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: true,
            },
            RelayError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: true,
            },
        }
    }
}
