use super::provider::ProviderError;
use crate::domain::usage::{Feature, QuotaError};
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum FailoverError {
    #[error("no AI providers are configured")]
    NoProviders,
    #[error("all {attempts} AI providers failed, last was {provider}: {source}")]
    AllProvidersFailed {
        provider: String,
        attempts: usize,
        #[source]
        source: ProviderError,
    },
    #[error("provider {provider} rejected the request: {source}")]
    Rejected {
        provider: String,
        #[source]
        source: ProviderError,
    },
}

/// A provider answered but the payload does not have the expected shape
#[derive(Debug, thiserror::Error)]
pub enum ResponseFormatError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload contains no items")]
    Empty,
    #[error("item {index} is invalid: {reason}")]
    InvalidItem { index: usize, reason: String },
}

/// Outcome of a feature orchestration that did not produce a result
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Quota(#[from] QuotaError),
    #[error(transparent)]
    Providers(#[from] FailoverError),
    #[error("{feature} response from {provider} could not be parsed: {source}")]
    ResponseFormat {
        feature: Feature,
        provider: String,
        #[source]
        source: ResponseFormatError,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<FailoverError> for AppError {
    fn from(err: FailoverError) -> Self {
        match err {
            FailoverError::Rejected { .. } => AppError::BadRequest(err.to_string()),
            FailoverError::NoProviders | FailoverError::AllProvidersFailed { .. } => {
                AppError::ServiceUnavailable(err.to_string())
            }
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Invalid(msg) => AppError::BadRequest(msg),
            GenerationError::Quota(e) => AppError::from(e),
            GenerationError::Providers(e) => AppError::from(e),
            GenerationError::ResponseFormat { .. } => {
                AppError::InvalidUpstreamResponse(err.to_string())
            }
            GenerationError::NotFound(msg) => AppError::NotFound(msg),
            GenerationError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
