pub mod chat;
pub mod flashcards;
pub mod health;
pub mod quiz;
pub mod summary;
pub mod usage;

use serde::Deserialize;

/// `?userId=` query; a missing id is rejected by the service as a bad request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default)]
    pub user_id: String,
}
