use super::{ChatMessage, ChatRequest, ChatStore};
use crate::domain::ai::{prompt, validation, AiGateway, GenerationError};
use crate::domain::usage::Feature;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct ChatService {
    gateway: Arc<AiGateway>,
    chat_store: Arc<dyn ChatStore>,
}

impl ChatService {
    pub fn new(gateway: Arc<AiGateway>, chat_store: Arc<dyn ChatStore>) -> Self {
        Self {
            gateway,
            chat_store,
        }
    }
}

#[async_trait]
pub trait ChatServiceApi: Send + Sync {
    /// Answer a chat message and store the exchange.
    ///
    /// A missing session id starts a new session.
    async fn send_message(&self, request: ChatRequest) -> Result<ChatMessage, GenerationError>;

    async fn session_history(&self, session_id: &str) -> Result<Vec<ChatMessage>, GenerationError>;
}

#[async_trait]
impl ChatServiceApi for ChatService {
    async fn send_message(&self, request: ChatRequest) -> Result<ChatMessage, GenerationError> {
        validation::require_text("message", &request.message)?;
        let user_id = request.user_id.trim().to_string();

        let session_id = request
            .session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let result = self
            .gateway
            .generate(&user_id, Feature::Chat, &prompt::chat(&request.message))
            .await?;

        let message = ChatMessage {
            id: Uuid::new_v4(),
            user_id,
            session_id,
            user_message: request.message,
            ai_response: result.value,
            provider: result.provider,
            created_at: Utc::now(),
        };

        self.chat_store
            .save(&message)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))?;

        Ok(message)
    }

    async fn session_history(&self, session_id: &str) -> Result<Vec<ChatMessage>, GenerationError> {
        self.chat_store
            .history(session_id)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))
    }
}
