use crate::domain::chat::{ChatMessage, ChatStore};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct ChatRepository {
    pool: Arc<DbPool>,
}

impl ChatRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for ChatRepository {
    async fn save(&self, message: &ChatMessage) -> AppResult<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, user_id, session_id, user_message, ai_response, provider, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id)
        .bind(&message.user_id)
        .bind(&message.session_id)
        .bind(&message.user_message)
        .bind(&message.ai_response)
        .bind(&message.provider)
        .bind(message.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(message.id)
    }

    async fn history(&self, session_id: &str) -> AppResult<Vec<ChatMessage>> {
        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, user_id, session_id, user_message, ai_response, provider, created_at
            FROM chat_messages
            WHERE session_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(messages)
    }
}
