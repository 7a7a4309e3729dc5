use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::UserQuery;
use crate::domain::usage::{DailyUsage, QuotaGuard, UsageStats};
use crate::error::AppResult;

const DEFAULT_HISTORY_DAYS: i64 = 7;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    pub user_id: String,
    pub days: Option<i64>,
}

pub struct UsageController {
    quota_guard: Arc<QuotaGuard>,
}

impl UsageController {
    pub fn new(quota_guard: Arc<QuotaGuard>) -> Self {
        Self { quota_guard }
    }

    /// GET /api/ai/usage/stats?userId= - Remaining quota for today
    pub async fn stats(
        State(controller): State<Arc<UsageController>>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<Json<UsageStats>> {
        let stats = controller.quota_guard.user_stats(&query.user_id).await?;
        Ok(Json(stats))
    }

    /// GET /api/ai/usage/history?userId=&days= - Daily usage, newest first
    pub async fn history(
        State(controller): State<Arc<UsageController>>,
        Query(query): Query<HistoryQuery>,
    ) -> AppResult<Json<Vec<DailyUsage>>> {
        let history = controller
            .quota_guard
            .usage_history(&query.user_id, query.days.unwrap_or(DEFAULT_HISTORY_DAYS))
            .await?;
        Ok(Json(history))
    }
}
