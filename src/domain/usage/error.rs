use super::model::Feature;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum QuotaError {
    #[error("AI features are temporarily disabled")]
    FeatureDisabled,
    #[error("Too many requests. Please wait {} seconds before trying again.", retry_after.as_secs())]
    RateLimited { retry_after: Duration },
    #[error("Daily limit reached for {feature}. Limit: {limit} requests per day. Try again tomorrow!")]
    DailyLimitExceeded {
        feature: Feature,
        limit: u32,
        resets_at: DateTime<Utc>,
    },
    #[error("user id is required")]
    MissingUser,
    #[error("usage record for user {user_id} kept changing concurrently")]
    Contention { user_id: String },
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<QuotaError> for AppError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::FeatureDisabled => AppError::FeatureDisabled(err.to_string()),
            QuotaError::RateLimited { retry_after } => AppError::RateLimitExceeded {
                message: err.to_string(),
                retry_after_secs: retry_after.as_secs(),
            },
            QuotaError::DailyLimitExceeded { resets_at, .. } => {
                let retry_after_secs = (resets_at - Utc::now()).num_seconds().max(1) as u64;
                AppError::DailyLimitExceeded {
                    message: err.to_string(),
                    retry_after_secs,
                }
            }
            QuotaError::MissingUser => AppError::BadRequest(err.to_string()),
            QuotaError::Contention { .. } => AppError::ServiceUnavailable(err.to_string()),
            QuotaError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
