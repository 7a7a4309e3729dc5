use crate::domain::flashcards::{Flashcard, FlashcardDeck, FlashcardStore};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct FlashcardRepository {
    pool: Arc<DbPool>,
}

impl FlashcardRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FlashcardStore for FlashcardRepository {
    async fn save_deck(&self, deck: &FlashcardDeck) -> AppResult<Uuid> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO flashcard_decks (id, user_id, topic, provider, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(deck.id)
        .bind(&deck.user_id)
        .bind(&deck.topic)
        .bind(&deck.provider)
        .bind(deck.created_at)
        .execute(&mut *tx)
        .await?;

        for card in &deck.cards {
            sqlx::query(
                r#"
                INSERT INTO flashcards (id, deck_id, topic, question, answer, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(card.id)
            .bind(card.deck_id)
            .bind(&card.topic)
            .bind(&card.question)
            .bind(&card.answer)
            .bind(card.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deck.id)
    }

    async fn find_by_topic(&self, topic: &str) -> AppResult<Vec<Flashcard>> {
        let cards = sqlx::query_as::<_, Flashcard>(
            r#"
            SELECT id, deck_id, topic, question, answer, created_at
            FROM flashcards
            WHERE topic = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(topic)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }
}
