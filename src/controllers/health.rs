use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::db::{check_connection, DbPool};

/// What the readiness probe has to check
pub enum Readiness {
    Database(Arc<DbPool>),
    InMemory,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(readiness): State<Arc<Readiness>>) -> impl IntoResponse {
    let pool = match readiness.as_ref() {
        Readiness::InMemory => {
            return (
                StatusCode::OK,
                Json(json!({ "status": "ready", "storage": "memory" })),
            )
        }
        Readiness::Database(pool) => pool,
    };

    match check_connection(pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "storage": "postgres",
                "database": "connected"
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "storage": "postgres",
                    "database": "disconnected"
                })),
            )
        }
    }
}
