use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::domain::chat::{ChatMessage, ChatRequest, ChatService, ChatServiceApi};
use crate::error::AppResult;

pub struct ChatController {
    chat_service: Arc<ChatService>,
}

impl ChatController {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    /// POST /api/chat - Send a message and get the AI reply
    pub async fn send_message(
        State(controller): State<Arc<ChatController>>,
        Json(request): Json<ChatRequest>,
    ) -> AppResult<Json<ChatMessage>> {
        let message = controller.chat_service.send_message(request).await?;
        Ok(Json(message))
    }

    /// GET /api/chat/history/{sessionId} - Exchanges of a session, oldest first
    pub async fn session_history(
        State(controller): State<Arc<ChatController>>,
        Path(session_id): Path<String>,
    ) -> AppResult<Json<Vec<ChatMessage>>> {
        let history = controller
            .chat_service
            .session_history(&session_id)
            .await?;
        Ok(Json(history))
    }
}
