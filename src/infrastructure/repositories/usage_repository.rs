use crate::domain::usage::{UsageRecord, UsageStore};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

pub struct UsageRepository {
    pool: Arc<DbPool>,
}

impl UsageRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageStore for UsageRepository {
    async fn get(&self, user_id: &str, date: NaiveDate) -> AppResult<Option<UsageRecord>> {
        let pool = self.pool.as_ref();

        let usage = sqlx::query_as::<_, UsageRecord>(
            r#"
            SELECT user_id, date, chat_count, flashcards_count, quiz_count, summary_count,
                   total_requests, last_request_at, version
            FROM ai_usage
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(usage)
    }

    async fn upsert_if_version(
        &self,
        record: &UsageRecord,
        expected_version: i64,
    ) -> AppResult<bool> {
        let pool = self.pool.as_ref();

        // The unique (user_id, date) constraint makes the first insert of the
        // day a compare-and-set against "absent".
        let result = if expected_version == 0 {
            sqlx::query(
                r#"
                INSERT INTO ai_usage (user_id, date, chat_count, flashcards_count, quiz_count,
                                      summary_count, total_requests, last_request_at, version)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (user_id, date) DO NOTHING
                "#,
            )
            .bind(&record.user_id)
            .bind(record.date)
            .bind(record.chat_count)
            .bind(record.flashcards_count)
            .bind(record.quiz_count)
            .bind(record.summary_count)
            .bind(record.total_requests)
            .bind(record.last_request_at)
            .bind(record.version)
            .execute(pool)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE ai_usage
                SET chat_count = $3,
                    flashcards_count = $4,
                    quiz_count = $5,
                    summary_count = $6,
                    total_requests = $7,
                    last_request_at = $8,
                    version = $9,
                    updated_at = NOW()
                WHERE user_id = $1 AND date = $2 AND version = $10
                "#,
            )
            .bind(&record.user_id)
            .bind(record.date)
            .bind(record.chat_count)
            .bind(record.flashcards_count)
            .bind(record.quiz_count)
            .bind(record.summary_count)
            .bind(record.total_requests)
            .bind(record.last_request_at)
            .bind(record.version)
            .bind(expected_version)
            .execute(pool)
            .await?
        };

        Ok(result.rows_affected() == 1)
    }

    async fn history(&self, user_id: &str, limit: i64) -> AppResult<Vec<UsageRecord>> {
        let pool = self.pool.as_ref();

        let records = sqlx::query_as::<_, UsageRecord>(
            r#"
            SELECT user_id, date, chat_count, flashcards_count, quiz_count, summary_count,
                   total_requests, last_request_at, version
            FROM ai_usage
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
