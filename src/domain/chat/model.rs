use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One question/answer exchange within a chat session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: String,
    pub session_id: String,
    pub user_message: String,
    pub ai_response: String,
    pub provider: String,
    pub created_at: DateTime<Utc>,
}
