pub mod ai;
pub mod chat;
pub mod flashcards;
pub mod quiz;
pub mod summary;
pub mod usage;
