use super::model::UsageRecord;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistent per-user, per-day usage counters.
///
/// Only `QuotaGuard` writes through this trait.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Get the record for a user and day, if one has been written
    async fn get(&self, user_id: &str, date: NaiveDate) -> AppResult<Option<UsageRecord>>;

    /// Atomically write `record` if the stored version for its
    /// `(user_id, date)` key still equals `expected_version`.
    ///
    /// An `expected_version` of 0 means "no record exists yet". Returns
    /// `false` when another writer got there first.
    async fn upsert_if_version(&self, record: &UsageRecord, expected_version: i64)
        -> AppResult<bool>;

    /// Most recent records for a user, newest first
    async fn history(&self, user_id: &str, limit: i64) -> AppResult<Vec<UsageRecord>>;
}
