use super::{parse_quiz_questions, Quiz, QuizRequest, QuizStore};
use crate::domain::ai::{prompt, validation, AiGateway, GenerationError};
use crate::domain::usage::Feature;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct QuizService {
    gateway: Arc<AiGateway>,
    quiz_store: Arc<dyn QuizStore>,
}

impl QuizService {
    pub fn new(gateway: Arc<AiGateway>, quiz_store: Arc<dyn QuizStore>) -> Self {
        Self {
            gateway,
            quiz_store,
        }
    }
}

#[async_trait]
pub trait QuizServiceApi: Send + Sync {
    async fn generate(&self, request: QuizRequest) -> Result<Quiz, GenerationError>;

    async fn find_quiz(&self, id: Uuid) -> Result<Quiz, GenerationError>;

    async fn quizzes_by_topic(&self, topic: &str) -> Result<Vec<Quiz>, GenerationError>;
}

#[async_trait]
impl QuizServiceApi for QuizService {
    async fn generate(&self, request: QuizRequest) -> Result<Quiz, GenerationError> {
        let topic = validation::require_text("topic", &request.topic)?.to_string();
        let user_id = request.user_id.trim().to_string();
        let question_count = validation::item_count(request.question_count)?;

        let result = self
            .gateway
            .generate(
                &user_id,
                Feature::Quiz,
                &prompt::quiz(&topic, question_count),
            )
            .await?;

        let questions = parse_quiz_questions(&result.value).map_err(|source| {
            tracing::error!(
                provider = %result.provider,
                error = %source,
                "Failed to parse quiz from AI response"
            );
            GenerationError::ResponseFormat {
                feature: Feature::Quiz,
                provider: result.provider.clone(),
                source,
            }
        })?;

        let quiz = Quiz::new(user_id, topic, result.provider, questions);
        self.quiz_store
            .save(&quiz)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))?;

        tracing::info!(
            quiz_id = %quiz.id,
            questions = quiz.questions.len(),
            "Quiz stored"
        );

        Ok(quiz)
    }

    async fn find_quiz(&self, id: Uuid) -> Result<Quiz, GenerationError> {
        self.quiz_store
            .find_by_id(id)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))?
            .ok_or_else(|| GenerationError::NotFound(format!("Quiz {} not found", id)))
    }

    async fn quizzes_by_topic(&self, topic: &str) -> Result<Vec<Quiz>, GenerationError> {
        let topic = validation::require_text("topic", topic)?;
        self.quiz_store
            .find_by_topic(topic)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))
    }
}
