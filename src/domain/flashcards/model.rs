use crate::domain::ai::{parse_json_array, ResponseFormatError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A card as the model returns it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedFlashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Cards produced by one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardDeck {
    pub id: Uuid,
    pub user_id: String,
    pub topic: String,
    pub provider: String,
    pub cards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
}

impl FlashcardDeck {
    pub fn new(
        user_id: String,
        topic: String,
        provider: String,
        generated: Vec<GeneratedFlashcard>,
    ) -> Self {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let cards = generated
            .into_iter()
            .map(|card| Flashcard {
                id: Uuid::new_v4(),
                deck_id: id,
                topic: topic.clone(),
                question: card.question,
                answer: card.answer,
                created_at,
            })
            .collect();

        Self {
            id,
            user_id,
            topic,
            provider,
            cards,
            created_at,
        }
    }
}

/// Parse a provider payload into flashcards. Any card with a blank side fails
/// the whole payload.
pub fn parse_flashcards(raw: &str) -> Result<Vec<GeneratedFlashcard>, ResponseFormatError> {
    let cards: Vec<GeneratedFlashcard> = parse_json_array(raw)?;
    for (index, card) in cards.iter().enumerate() {
        if card.question.trim().is_empty() || card.answer.trim().is_empty() {
            return Err(ResponseFormatError::InvalidItem {
                index,
                reason: "question and answer must not be blank".to_string(),
            });
        }
    }
    Ok(cards)
}
