pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    chat::ChatController,
    flashcards::FlashcardController,
    health::{self, Readiness},
    quiz::QuizController,
    summary::SummaryController,
    usage::UsageController,
};
use crate::infrastructure::config::Config;

/// Everything the router needs, wired once in `main`
#[derive(Clone)]
pub struct Controllers {
    pub chat: Arc<ChatController>,
    pub flashcards: Arc<FlashcardController>,
    pub quiz: Arc<QuizController>,
    pub summary: Arc<SummaryController>,
    pub usage: Arc<UsageController>,
    pub readiness: Arc<Readiness>,
}

/// Build the application router with all routes and global layers
pub fn create_router(controllers: Controllers) -> Router {
    let chat_routes = Router::new()
        .route("/api/chat", post(ChatController::send_message))
        .route(
            "/api/chat/history/:sessionId",
            get(ChatController::session_history),
        )
        .with_state(controllers.chat);

    let flashcard_routes = Router::new()
        .route(
            "/api/flashcards/generate",
            post(FlashcardController::generate),
        )
        .route(
            "/api/flashcards/topic/:topic",
            get(FlashcardController::by_topic),
        )
        .with_state(controllers.flashcards);

    let quiz_routes = Router::new()
        .route("/api/quiz/generate", post(QuizController::generate))
        .route("/api/quiz/topic/:topic", get(QuizController::by_topic))
        .route("/api/quiz/:quizId", get(QuizController::get_quiz))
        .with_state(controllers.quiz);

    let summary_routes = Router::new()
        .route(
            "/api/summary",
            get(SummaryController::list).post(SummaryController::summarize),
        )
        .with_state(controllers.summary);

    let usage_routes = Router::new()
        .route("/api/ai/usage/stats", get(UsageController::stats))
        .route("/api/ai/usage/history", get(UsageController::history))
        .with_state(controllers.usage);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(controllers.readiness)
        .merge(chat_routes)
        .merge(flashcard_routes)
        .merge(quiz_routes)
        .merge(summary_routes)
        .merge(usage_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve until the process stops
pub async fn start_http_server(config: &Config, router: Router) -> anyhow::Result<()> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
