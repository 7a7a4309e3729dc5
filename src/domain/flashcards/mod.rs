pub mod model;
pub mod service;

pub use model::{parse_flashcards, Flashcard, FlashcardDeck, GeneratedFlashcard};
pub use service::{FlashcardService, FlashcardServiceApi};

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/flashcards/generate
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRequest {
    pub user_id: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[async_trait]
pub trait FlashcardStore: Send + Sync {
    /// Persist a deck and all of its cards
    async fn save_deck(&self, deck: &FlashcardDeck) -> AppResult<Uuid>;

    /// Cards for a topic, newest first
    async fn find_by_topic(&self, topic: &str) -> AppResult<Vec<Flashcard>>;
}
