use super::error::QuotaError;
use super::model::{next_utc_midnight, DailyUsage, Feature, UsageRecord, UsageStats};
use super::quota::FeatureQuota;
use super::store::UsageStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

const MAX_HISTORY_DAYS: i64 = 30;

/// Decides whether a user may spend one unit of a feature's daily quota.
///
/// The read-modify-write on a `(user_id, date)` record is serialized with an
/// optimistic version check on the store, so concurrent requests from one
/// user never over-admit while different users never contend.
pub struct QuotaGuard {
    usage_store: Arc<dyn UsageStore>,
    quota: FeatureQuota,
}

impl QuotaGuard {
    pub fn new(usage_store: Arc<dyn UsageStore>, quota: FeatureQuota) -> Self {
        Self { usage_store, quota }
    }

    /// Check rate and daily limits and, when both pass, record the request.
    /// Returns the record as persisted.
    pub async fn check_and_consume(
        &self,
        user_id: &str,
        feature: Feature,
    ) -> Result<UsageRecord, QuotaError> {
        self.check_and_consume_at(user_id, feature, Utc::now()).await
    }

    /// Remaining quota per feature for today. Never writes.
    pub async fn user_stats(&self, user_id: &str) -> Result<UsageStats, QuotaError> {
        self.user_stats_at(user_id, Utc::now()).await
    }

    /// Last `days` daily records for a user, newest first
    pub async fn usage_history(
        &self,
        user_id: &str,
        days: i64,
    ) -> Result<Vec<DailyUsage>, QuotaError> {
        let user_id = validate_user(user_id)?;
        let records = self
            .usage_store
            .history(user_id, days.clamp(1, MAX_HISTORY_DAYS))
            .await
            .map_err(|e| QuotaError::Dependency(e.to_string()))?;
        Ok(records.into_iter().map(DailyUsage::from).collect())
    }

    async fn check_and_consume_at(
        &self,
        user_id: &str,
        feature: Feature,
        now: DateTime<Utc>,
    ) -> Result<UsageRecord, QuotaError> {
        if !self.quota.ai_enabled() {
            return Err(QuotaError::FeatureDisabled);
        }
        let user_id = validate_user(user_id)?;
        let today = now.date_naive();

        for attempt in 1..=self.max_write_attempts() {
            let current = self.load_or_new(user_id, today).await?;

            if let Err(err) = self.evaluate(&current, feature, now) {
                tracing::warn!(
                    user_id = %user_id,
                    feature = feature.as_str(),
                    error = %err,
                    "AI request rejected by quota"
                );
                return Err(err);
            }

            let expected_version = current.version;
            let mut next = current;
            next.record_accepted(feature, now);
            next.version = expected_version + 1;

            let written = self
                .usage_store
                .upsert_if_version(&next, expected_version)
                .await
                .map_err(|e| QuotaError::Dependency(e.to_string()))?;

            if written {
                tracing::info!(
                    user_id = %user_id,
                    feature = feature.as_str(),
                    feature_count = next.count(feature),
                    total_today = next.total_requests,
                    "AI usage recorded"
                );
                return Ok(next);
            }

            tracing::debug!(
                user_id = %user_id,
                feature = feature.as_str(),
                attempt,
                "Usage record changed concurrently, retrying"
            );
        }

        Err(QuotaError::Contention {
            user_id: user_id.to_string(),
        })
    }

    /// Every lost race means another request for the same user and day was
    /// accepted, and a day can accept at most the sum of all feature limits.
    /// Once that many races are lost the next read must see a full quota, so
    /// a request is only cut off with `Contention` if the store keeps
    /// refusing writes without anyone else being admitted.
    fn max_write_attempts(&self) -> u64 {
        self.quota.total_daily_limit() + 1
    }

    async fn user_stats_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<UsageStats, QuotaError> {
        let user_id = validate_user(user_id)?;
        let usage = self.load_or_new(user_id, now.date_naive()).await?;

        Ok(UsageStats {
            chat_remaining: self.remaining(&usage, Feature::Chat),
            flashcards_remaining: self.remaining(&usage, Feature::Flashcards),
            quiz_remaining: self.remaining(&usage, Feature::Quiz),
            summary_remaining: self.remaining(&usage, Feature::Summary),
            total_requests_today: u32::try_from(usage.total_requests).unwrap_or(0),
            resets_at: next_utc_midnight(now),
        })
    }

    async fn load_or_new(
        &self,
        user_id: &str,
        today: chrono::NaiveDate,
    ) -> Result<UsageRecord, QuotaError> {
        let usage = self
            .usage_store
            .get(user_id, today)
            .await
            .map_err(|e| QuotaError::Dependency(e.to_string()))?;
        Ok(usage.unwrap_or_else(|| UsageRecord::new(user_id, today)))
    }

    /// Rate check first (across all features), then the feature's daily cap
    fn evaluate(
        &self,
        usage: &UsageRecord,
        feature: Feature,
        now: DateTime<Utc>,
    ) -> Result<(), QuotaError> {
        if let Some(last) = usage.last_request_at {
            let min_interval = self.quota.min_interval();
            let elapsed = (now - last).to_std().unwrap_or(Duration::ZERO);
            if elapsed < min_interval {
                return Err(QuotaError::RateLimited {
                    retry_after: round_up_secs(min_interval - elapsed),
                });
            }
        }

        let limit = self.quota.daily_limit(feature);
        if i64::from(usage.count(feature)) >= i64::from(limit) {
            return Err(QuotaError::DailyLimitExceeded {
                feature,
                limit,
                resets_at: next_utc_midnight(now),
            });
        }

        Ok(())
    }

    fn remaining(&self, usage: &UsageRecord, feature: Feature) -> u32 {
        let used = u32::try_from(usage.count(feature)).unwrap_or(0);
        self.quota.daily_limit(feature).saturating_sub(used)
    }
}

fn validate_user(user_id: &str) -> Result<&str, QuotaError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(QuotaError::MissingUser);
    }
    Ok(user_id)
}

fn round_up_secs(wait: Duration) -> Duration {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    Duration::from_secs(secs.max(1))
}
