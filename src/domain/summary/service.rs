use super::{Summary, SummaryRequest, SummaryStore};
use crate::domain::ai::{prompt, validation, AiGateway, GenerationError};
use crate::domain::usage::Feature;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub const MAX_SUMMARY_INPUT_CHARS: usize = 20_000;

pub struct SummaryService {
    gateway: Arc<AiGateway>,
    summary_store: Arc<dyn SummaryStore>,
}

impl SummaryService {
    pub fn new(gateway: Arc<AiGateway>, summary_store: Arc<dyn SummaryStore>) -> Self {
        Self {
            gateway,
            summary_store,
        }
    }
}

#[async_trait]
pub trait SummaryServiceApi: Send + Sync {
    async fn summarize(&self, request: SummaryRequest) -> Result<Summary, GenerationError>;

    async fn summaries_for_user(&self, user_id: &str) -> Result<Vec<Summary>, GenerationError>;
}

#[async_trait]
impl SummaryServiceApi for SummaryService {
    async fn summarize(&self, request: SummaryRequest) -> Result<Summary, GenerationError> {
        validation::require_text("text", &request.text)?;
        let user_id = request.user_id.trim().to_string();
        let char_count = request.text.chars().count();
        if char_count > MAX_SUMMARY_INPUT_CHARS {
            return Err(GenerationError::Invalid(format!(
                "text must be {} characters or less, got {}",
                MAX_SUMMARY_INPUT_CHARS, char_count
            )));
        }

        let result = self
            .gateway
            .generate(&user_id, Feature::Summary, &prompt::summary(&request.text))
            .await?;

        let summary = Summary {
            id: Uuid::new_v4(),
            user_id,
            original_text: request.text,
            summarized_text: result.value,
            provider: result.provider,
            created_at: Utc::now(),
        };

        self.summary_store
            .save(&summary)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))?;

        Ok(summary)
    }

    async fn summaries_for_user(&self, user_id: &str) -> Result<Vec<Summary>, GenerationError> {
        let user_id = validation::require_text("userId", user_id)?;
        self.summary_store
            .list_for_user(user_id)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))
    }
}
