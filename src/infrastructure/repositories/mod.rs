pub mod chat_repository;
pub mod flashcard_repository;
pub mod memory;
pub mod quiz_repository;
pub mod summary_repository;
pub mod usage_repository;

pub use chat_repository::ChatRepository;
pub use flashcard_repository::FlashcardRepository;
pub use memory::{
    InMemoryChatStore, InMemoryFlashcardStore, InMemoryQuizStore, InMemorySummaryStore,
    InMemoryUsageStore,
};
pub use quiz_repository::QuizRepository;
pub use summary_repository::SummaryRepository;
pub use usage_repository::UsageRepository;
