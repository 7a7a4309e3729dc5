pub mod model;
pub mod service;

pub use model::Summary;
pub use service::{SummaryService, SummaryServiceApi, MAX_SUMMARY_INPUT_CHARS};

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/summary
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub user_id: String,
    pub text: String,
}

#[async_trait]
pub trait SummaryStore: Send + Sync {
    async fn save(&self, summary: &Summary) -> AppResult<Uuid>;

    /// Summaries of a user, newest first
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Summary>>;
}
