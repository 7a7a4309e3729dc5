use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: Uuid,
    pub user_id: String,
    pub original_text: String,
    pub summarized_text: String,
    pub provider: String,
    pub created_at: DateTime<Utc>,
}
