//! In-process stores for local development and tests.
//!
//! Each store keeps its data behind a single `parking_lot` lock; every trait
//! method holds the lock for the whole operation, which gives the usage store
//! the same atomic compare-and-set semantics as the Postgres implementation.

use crate::domain::chat::{ChatMessage, ChatStore};
use crate::domain::flashcards::{Flashcard, FlashcardDeck, FlashcardStore};
use crate::domain::quiz::{Quiz, QuizStore};
use crate::domain::summary::{Summary, SummaryStore};
use crate::domain::usage::{UsageRecord, UsageStore};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::cmp::Reverse;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryUsageStore {
    records: Mutex<HashMap<(String, NaiveDate), UsageRecord>>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn get(&self, user_id: &str, date: NaiveDate) -> AppResult<Option<UsageRecord>> {
        Ok(self.records.lock().get(&(user_id.to_string(), date)).cloned())
    }

    async fn upsert_if_version(
        &self,
        record: &UsageRecord,
        expected_version: i64,
    ) -> AppResult<bool> {
        let mut records = self.records.lock();
        let key = (record.user_id.clone(), record.date);
        let stored_version = records.get(&key).map(|r| r.version).unwrap_or(0);
        if stored_version != expected_version {
            return Ok(false);
        }
        records.insert(key, record.clone());
        Ok(true)
    }

    async fn history(&self, user_id: &str, limit: i64) -> AppResult<Vec<UsageRecord>> {
        let mut history: Vec<UsageRecord> = self
            .records
            .lock()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by_key(|r| Reverse(r.date));
        history.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(history)
    }
}

#[derive(Default)]
pub struct InMemoryChatStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn save(&self, message: &ChatMessage) -> AppResult<Uuid> {
        self.messages.lock().push(message.clone());
        Ok(message.id)
    }

    async fn history(&self, session_id: &str) -> AppResult<Vec<ChatMessage>> {
        // Insertion order is chronological
        Ok(self
            .messages
            .lock()
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryFlashcardStore {
    decks: Mutex<Vec<FlashcardDeck>>,
}

impl InMemoryFlashcardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlashcardStore for InMemoryFlashcardStore {
    async fn save_deck(&self, deck: &FlashcardDeck) -> AppResult<Uuid> {
        self.decks.lock().push(deck.clone());
        Ok(deck.id)
    }

    async fn find_by_topic(&self, topic: &str) -> AppResult<Vec<Flashcard>> {
        Ok(self
            .decks
            .lock()
            .iter()
            .rev()
            .filter(|d| d.topic == topic)
            .flat_map(|d| d.cards.iter().cloned())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryQuizStore {
    quizzes: Mutex<Vec<Quiz>>,
}

impl InMemoryQuizStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for InMemoryQuizStore {
    async fn save(&self, quiz: &Quiz) -> AppResult<Uuid> {
        self.quizzes.lock().push(quiz.clone());
        Ok(quiz.id)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.lock().iter().find(|q| q.id == id).cloned())
    }

    async fn find_by_topic(&self, topic: &str) -> AppResult<Vec<Quiz>> {
        Ok(self
            .quizzes
            .lock()
            .iter()
            .rev()
            .filter(|q| q.topic == topic)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySummaryStore {
    summaries: Mutex<Vec<Summary>>,
}

impl InMemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SummaryStore for InMemorySummaryStore {
    async fn save(&self, summary: &Summary) -> AppResult<Uuid> {
        self.summaries.lock().push(summary.clone());
        Ok(summary.id)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Summary>> {
        Ok(self
            .summaries
            .lock()
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}
