use super::{parse_flashcards, Flashcard, FlashcardDeck, FlashcardRequest, FlashcardStore};
use crate::domain::ai::{prompt, validation, AiGateway, GenerationError};
use crate::domain::usage::Feature;
use async_trait::async_trait;
use std::sync::Arc;

pub struct FlashcardService {
    gateway: Arc<AiGateway>,
    flashcard_store: Arc<dyn FlashcardStore>,
}

impl FlashcardService {
    pub fn new(gateway: Arc<AiGateway>, flashcard_store: Arc<dyn FlashcardStore>) -> Self {
        Self {
            gateway,
            flashcard_store,
        }
    }
}

#[async_trait]
pub trait FlashcardServiceApi: Send + Sync {
    async fn generate(&self, request: FlashcardRequest) -> Result<FlashcardDeck, GenerationError>;

    async fn cards_by_topic(&self, topic: &str) -> Result<Vec<Flashcard>, GenerationError>;
}

#[async_trait]
impl FlashcardServiceApi for FlashcardService {
    async fn generate(&self, request: FlashcardRequest) -> Result<FlashcardDeck, GenerationError> {
        let topic = validation::require_text("topic", &request.topic)?.to_string();
        let user_id = request.user_id.trim().to_string();
        let count = validation::item_count(request.count)?;

        let result = self
            .gateway
            .generate(
                &user_id,
                Feature::Flashcards,
                &prompt::flashcards(&topic, count),
            )
            .await?;

        let cards = parse_flashcards(&result.value).map_err(|source| {
            tracing::error!(
                provider = %result.provider,
                error = %source,
                "Failed to parse flashcards from AI response"
            );
            GenerationError::ResponseFormat {
                feature: Feature::Flashcards,
                provider: result.provider.clone(),
                source,
            }
        })?;

        if cards.len() != count as usize {
            tracing::debug!(
                requested = count,
                returned = cards.len(),
                "Flashcard count differs from request"
            );
        }

        let deck = FlashcardDeck::new(user_id, topic, result.provider, cards);
        self.flashcard_store
            .save_deck(&deck)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))?;

        Ok(deck)
    }

    async fn cards_by_topic(&self, topic: &str) -> Result<Vec<Flashcard>, GenerationError> {
        let topic = validation::require_text("topic", topic)?;
        self.flashcard_store
            .find_by_topic(topic)
            .await
            .map_err(|e| GenerationError::Dependency(e.to_string()))
    }
}
