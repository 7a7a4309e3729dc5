use crate::domain::quiz::{Quiz, QuizQuestion, QuizStore};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct QuizRow {
    id: Uuid,
    user_id: String,
    topic: String,
    provider: String,
    questions: Json<Vec<QuizQuestion>>,
    created_at: DateTime<Utc>,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            topic: row.topic,
            provider: row.provider,
            questions: row.questions.0,
            created_at: row.created_at,
        }
    }
}

pub struct QuizRepository {
    pool: Arc<DbPool>,
}

impl QuizRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizStore for QuizRepository {
    async fn save(&self, quiz: &Quiz) -> AppResult<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO quizzes (id, user_id, topic, provider, questions, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(quiz.id)
        .bind(&quiz.user_id)
        .bind(&quiz.topic)
        .bind(&quiz.provider)
        .bind(Json(&quiz.questions))
        .bind(quiz.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(quiz.id)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Quiz>> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, user_id, topic, provider, questions, created_at
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Quiz::from))
    }

    async fn find_by_topic(&self, topic: &str) -> AppResult<Vec<Quiz>> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, user_id, topic, provider, questions, created_at
            FROM quizzes
            WHERE topic = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(topic)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Quiz::from).collect())
    }
}
