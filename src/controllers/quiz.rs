use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::quiz::{Quiz, QuizRequest, QuizService, QuizServiceApi};
use crate::error::AppResult;

pub struct QuizController {
    quiz_service: Arc<QuizService>,
}

impl QuizController {
    pub fn new(quiz_service: Arc<QuizService>) -> Self {
        Self { quiz_service }
    }

    /// POST /api/quiz/generate - Generate a multiple-choice quiz
    pub async fn generate(
        State(controller): State<Arc<QuizController>>,
        Json(request): Json<QuizRequest>,
    ) -> AppResult<Json<Quiz>> {
        let quiz = controller.quiz_service.generate(request).await?;
        Ok(Json(quiz))
    }

    /// GET /api/quiz/{id}
    pub async fn get_quiz(
        State(controller): State<Arc<QuizController>>,
        Path(quiz_id): Path<Uuid>,
    ) -> AppResult<Json<Quiz>> {
        let quiz = controller.quiz_service.find_quiz(quiz_id).await?;
        Ok(Json(quiz))
    }

    /// GET /api/quiz/topic/{topic}
    pub async fn by_topic(
        State(controller): State<Arc<QuizController>>,
        Path(topic): Path<String>,
    ) -> AppResult<Json<Vec<Quiz>>> {
        let quizzes = controller.quiz_service.quizzes_by_topic(&topic).await?;
        Ok(Json(quizzes))
    }
}
