// End-to-end tests for the StudyBot Backend API
//
// Each test builds the full axum router over in-memory stores and a pair of
// stub AI providers, then drives it in-process with `tower::ServiceExt`.
// No network or database is involved, so tests run in parallel.

mod helpers;
mod test_chat;
mod test_flashcards;
mod test_health;
mod test_summary;
mod test_usage;
