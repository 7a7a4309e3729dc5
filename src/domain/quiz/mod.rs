pub mod model;
pub mod service;

pub use model::{parse_quiz_questions, Quiz, QuizQuestion};
pub use service::{QuizService, QuizServiceApi};

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/quiz/generate
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub user_id: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn save(&self, quiz: &Quiz) -> AppResult<Uuid>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Quiz>>;

    /// Quizzes for a topic, newest first
    async fn find_by_topic(&self, topic: &str) -> AppResult<Vec<Quiz>>;
}
