use async_trait::async_trait;
use std::time::Duration;

/// Failure of a single provider call
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream returned {}: {message}", status.map(|s| s.to_string()).unwrap_or_else(|| "an error".to_string()))]
    Upstream { status: Option<u16>, message: String },
    #[error("upstream rate limit hit: {0}")]
    RateLimited(String),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Whether another provider might succeed where this one failed.
    /// Only a request the caller built wrong is hopeless everywhere.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ProviderError::InvalidRequest(_))
    }

    /// Short machine-friendly label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Network(_) => "network",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::Auth(_) => "auth",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::InvalidRequest(_) => "invalid_request",
        }
    }
}

/// A remote text-generation endpoint.
///
/// Implementations hold only immutable configuration and a shared HTTP
/// client, so one instance serves any number of concurrent calls.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Stable identity used for attribution and logging
    fn name(&self) -> &str;

    /// Generate free-form text for `prompt`, giving up after `timeout`
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, ProviderError>;
}
