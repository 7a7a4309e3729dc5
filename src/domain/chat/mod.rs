pub mod model;
pub mod service;

pub use model::ChatMessage;
pub use service::{ChatService, ChatServiceApi};

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/chat
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn save(&self, message: &ChatMessage) -> AppResult<Uuid>;

    /// Exchanges of a session, oldest first
    async fn history(&self, session_id: &str) -> AppResult<Vec<ChatMessage>>;
}
