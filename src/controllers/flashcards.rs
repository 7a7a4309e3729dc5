use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::domain::flashcards::{
    Flashcard, FlashcardDeck, FlashcardRequest, FlashcardService, FlashcardServiceApi,
};
use crate::error::AppResult;

pub struct FlashcardController {
    flashcard_service: Arc<FlashcardService>,
}

impl FlashcardController {
    pub fn new(flashcard_service: Arc<FlashcardService>) -> Self {
        Self { flashcard_service }
    }

    /// POST /api/flashcards/generate - Generate a deck for a topic
    pub async fn generate(
        State(controller): State<Arc<FlashcardController>>,
        Json(request): Json<FlashcardRequest>,
    ) -> AppResult<Json<FlashcardDeck>> {
        let deck = controller.flashcard_service.generate(request).await?;
        Ok(Json(deck))
    }

    /// GET /api/flashcards/topic/{topic}
    pub async fn by_topic(
        State(controller): State<Arc<FlashcardController>>,
        Path(topic): Path<String>,
    ) -> AppResult<Json<Vec<Flashcard>>> {
        let cards = controller.flashcard_service.cards_by_topic(&topic).await?;
        Ok(Json(cards))
    }
}
