use super::error::GenerationError;
use super::failover::{FailoverInvoker, ProviderResult};
use crate::domain::usage::{Feature, QuotaGuard};
use std::sync::Arc;

/// Quota check followed by the provider chain, shared by every feature.
///
/// Quota is consumed before any provider is called and is not refunded if
/// the chain or the caller's parsing fails afterwards.
pub struct AiGateway {
    quota_guard: Arc<QuotaGuard>,
    invoker: Arc<FailoverInvoker>,
}

impl AiGateway {
    pub fn new(quota_guard: Arc<QuotaGuard>, invoker: Arc<FailoverInvoker>) -> Self {
        Self {
            quota_guard,
            invoker,
        }
    }

    pub async fn generate(
        &self,
        user_id: &str,
        feature: Feature,
        prompt: &str,
    ) -> Result<ProviderResult<String>, GenerationError> {
        let usage = self.quota_guard.check_and_consume(user_id, feature).await?;

        let result = self.invoker.complete(prompt).await?;

        tracing::info!(
            user_id = %user_id,
            feature = feature.as_str(),
            provider = %result.provider,
            fallbacks = result.failed_attempts.len(),
            used_today = usage.count(feature),
            "AI generation completed"
        );

        Ok(result)
    }
}
