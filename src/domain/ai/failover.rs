use super::error::FailoverError;
use super::provider::{AiProvider, ProviderError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// A successful invocation, tagged with the provider that answered
#[derive(Debug, Clone)]
pub struct ProviderResult<T> {
    pub value: T,
    pub provider: String,
    /// Attempts that failed before the successful one, in order
    pub failed_attempts: Vec<AttemptFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub provider: String,
    pub error: ProviderError,
}

enum AttemptOutcome<T> {
    Success(T),
    Failure(ProviderError),
}

/// Runs an operation against an ordered list of providers, moving on to the
/// next one after every transient failure.
///
/// Each provider is tried at most once per invocation, so latency is bounded
/// by `providers.len() * attempt_timeout`.
pub struct FailoverInvoker {
    providers: Vec<Arc<dyn AiProvider>>,
    attempt_timeout: Duration,
}

impl FailoverInvoker {
    pub fn new(providers: Vec<Arc<dyn AiProvider>>, attempt_timeout: Duration) -> Self {
        Self {
            providers,
            attempt_timeout,
        }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Send `prompt` through the chain and return the first completion
    pub async fn complete(&self, prompt: &str) -> Result<ProviderResult<String>, FailoverError> {
        let timeout = self.attempt_timeout;
        self.invoke(move |provider| async move { provider.complete(prompt, timeout).await })
            .await
    }

    pub async fn invoke<T, F, Fut>(&self, operation: F) -> Result<ProviderResult<T>, FailoverError>
    where
        F: Fn(Arc<dyn AiProvider>) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut failures: Vec<AttemptFailure> = Vec::new();

        for provider in &self.providers {
            let name = provider.name().to_string();

            match self.attempt(provider.clone(), &operation).await {
                AttemptOutcome::Success(value) => {
                    if !failures.is_empty() {
                        tracing::info!(
                            provider = %name,
                            failed_providers = failures.len(),
                            "AI request served by fallback provider"
                        );
                    }
                    return Ok(ProviderResult {
                        value,
                        provider: name,
                        failed_attempts: failures,
                    });
                }
                AttemptOutcome::Failure(error) if !error.is_transient() => {
                    tracing::warn!(
                        provider = %name,
                        reason = error.kind(),
                        error = %error,
                        "AI provider rejected the request, not trying other providers"
                    );
                    return Err(FailoverError::Rejected {
                        provider: name,
                        source: error,
                    });
                }
                AttemptOutcome::Failure(error) => {
                    tracing::warn!(
                        provider = %name,
                        reason = error.kind(),
                        error = %error,
                        "AI provider attempt failed"
                    );
                    failures.push(AttemptFailure {
                        provider: name,
                        error,
                    });
                }
            }
        }

        let attempts = failures.len();
        match failures.pop() {
            Some(last) => {
                tracing::error!(
                    attempts,
                    last_provider = %last.provider,
                    error = %last.error,
                    "All AI providers failed"
                );
                Err(FailoverError::AllProvidersFailed {
                    provider: last.provider,
                    attempts,
                    source: last.error,
                })
            }
            None => Err(FailoverError::NoProviders),
        }
    }

    async fn attempt<T, F, Fut>(&self, provider: Arc<dyn AiProvider>, operation: &F) -> AttemptOutcome<T>
    where
        F: Fn(Arc<dyn AiProvider>) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        match tokio::time::timeout(self.attempt_timeout, operation(provider)).await {
            Ok(Ok(value)) => AttemptOutcome::Success(value),
            Ok(Err(error)) => AttemptOutcome::Failure(error),
            Err(_) => AttemptOutcome::Failure(ProviderError::Timeout(self.attempt_timeout)),
        }
    }
}
