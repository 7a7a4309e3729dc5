use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::UserQuery;
use crate::domain::summary::{Summary, SummaryRequest, SummaryService, SummaryServiceApi};
use crate::error::AppResult;

pub struct SummaryController {
    summary_service: Arc<SummaryService>,
}

impl SummaryController {
    pub fn new(summary_service: Arc<SummaryService>) -> Self {
        Self { summary_service }
    }

    /// POST /api/summary - Summarize a block of text
    pub async fn summarize(
        State(controller): State<Arc<SummaryController>>,
        Json(request): Json<SummaryRequest>,
    ) -> AppResult<Json<Summary>> {
        let summary = controller.summary_service.summarize(request).await?;
        Ok(Json(summary))
    }

    /// GET /api/summary?userId= - Summaries of a user, newest first
    pub async fn list(
        State(controller): State<Arc<SummaryController>>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<Json<Vec<Summary>>> {
        let summaries = controller
            .summary_service
            .summaries_for_user(&query.user_id)
            .await?;
        Ok(Json(summaries))
    }
}
