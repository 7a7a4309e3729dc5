use crate::domain::summary::{Summary, SummaryStore};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct SummaryRepository {
    pool: Arc<DbPool>,
}

impl SummaryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryStore for SummaryRepository {
    async fn save(&self, summary: &Summary) -> AppResult<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO summaries (id, user_id, original_text, summarized_text, provider, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(summary.id)
        .bind(&summary.user_id)
        .bind(&summary.original_text)
        .bind(&summary.summarized_text)
        .bind(&summary.provider)
        .bind(summary.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(summary.id)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Summary>> {
        let summaries = sqlx::query_as::<_, Summary>(
            r#"
            SELECT id, user_id, original_text, summarized_text, provider, created_at
            FROM summaries
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(summaries)
    }
}
