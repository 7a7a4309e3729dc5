use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studybot_backend::controllers::{
    chat::ChatController, flashcards::FlashcardController, health::Readiness,
    quiz::QuizController, summary::SummaryController, usage::UsageController,
};
use studybot_backend::domain::ai::{AiGateway, AiProvider, FailoverInvoker};
use studybot_backend::domain::chat::{ChatService, ChatStore};
use studybot_backend::domain::flashcards::{FlashcardService, FlashcardStore};
use studybot_backend::domain::quiz::{QuizService, QuizStore};
use studybot_backend::domain::summary::{SummaryService, SummaryStore};
use studybot_backend::domain::usage::{QuotaGuard, UsageStore};
use studybot_backend::infrastructure::config::{
    Config, LogFormat, ProviderKind, StorageBackend,
};
use studybot_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use studybot_backend::infrastructure::http::{create_router, start_http_server, Controllers};
use studybot_backend::infrastructure::providers::{GeminiProvider, OpenAiCompatibleProvider};
use studybot_backend::infrastructure::repositories::{
    ChatRepository, FlashcardRepository, InMemoryChatStore, InMemoryFlashcardStore,
    InMemoryQuizStore, InMemorySummaryStore, InMemoryUsageStore, QuizRepository,
    SummaryRepository, UsageRepository,
};

struct Stores {
    usage: Arc<dyn UsageStore>,
    chat: Arc<dyn ChatStore>,
    flashcards: Arc<dyn FlashcardStore>,
    quiz: Arc<dyn QuizStore>,
    summary: Arc<dyn SummaryStore>,
    readiness: Readiness,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;

    init_logging(&config);

    tracing::info!(
        "Starting StudyBot Backend on {}:{}",
        config.host,
        config.port
    );

    let quota = config.feature_quota()?;
    tracing::info!(
        ai_enabled = quota.ai_enabled(),
        requests_per_minute = quota.requests_per_minute(),
        min_interval_secs = quota.min_interval().as_secs(),
        "AI quota configured"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Storage
    let stores = build_stores(&config).await?;

    // 2. Provider chain, primary first
    let providers = build_providers(&config);
    if providers.is_empty() {
        tracing::warn!("No AI provider configured; generation requests will fail");
    }
    let invoker = Arc::new(FailoverInvoker::new(providers, config.provider_timeout()));
    tracing::info!(
        providers = ?invoker.provider_names(),
        attempt_timeout_secs = config.provider_timeout_secs,
        "Provider chain ready"
    );

    // 3. Services
    let quota_guard = Arc::new(QuotaGuard::new(stores.usage, quota));
    let gateway = Arc::new(AiGateway::new(quota_guard.clone(), invoker));

    let chat_service = Arc::new(ChatService::new(gateway.clone(), stores.chat));
    let flashcard_service = Arc::new(FlashcardService::new(gateway.clone(), stores.flashcards));
    let quiz_service = Arc::new(QuizService::new(gateway.clone(), stores.quiz));
    let summary_service = Arc::new(SummaryService::new(gateway, stores.summary));

    // 4. Controllers
    let controllers = Controllers {
        chat: Arc::new(ChatController::new(chat_service)),
        flashcards: Arc::new(FlashcardController::new(flashcard_service)),
        quiz: Arc::new(QuizController::new(quiz_service)),
        summary: Arc::new(SummaryController::new(summary_service)),
        usage: Arc::new(UsageController::new(quota_guard)),
        readiness: Arc::new(stores.readiness),
    };

    start_http_server(&config, create_router(controllers)).await
}

async fn build_stores(config: &Config) -> anyhow::Result<Stores> {
    match (config.storage_backend, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = create_pool(database_url)
                .await
                .context("failed to create database pool")?;
            check_connection(&pool).await?;
            tracing::info!("Database connection verified");

            run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            let pool = Arc::new(pool);
            Ok(Stores {
                usage: Arc::new(UsageRepository::new(pool.clone())),
                chat: Arc::new(ChatRepository::new(pool.clone())),
                flashcards: Arc::new(FlashcardRepository::new(pool.clone())),
                quiz: Arc::new(QuizRepository::new(pool.clone())),
                summary: Arc::new(SummaryRepository::new(pool.clone())),
                readiness: Readiness::Database(pool),
            })
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required when STORAGE_BACKEND=postgres")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Ok(Stores {
                usage: Arc::new(InMemoryUsageStore::new()),
                chat: Arc::new(InMemoryChatStore::new()),
                flashcards: Arc::new(InMemoryFlashcardStore::new()),
                quiz: Arc::new(InMemoryQuizStore::new()),
                summary: Arc::new(InMemorySummaryStore::new()),
                readiness: Readiness::InMemory,
            })
        }
    }
}

fn build_providers(config: &Config) -> Vec<Arc<dyn AiProvider>> {
    let http_client = reqwest::Client::new();

    config
        .provider_order()
        .into_iter()
        .filter_map(|kind| -> Option<Arc<dyn AiProvider>> {
            match kind {
                ProviderKind::Groq => config.groq_api_key.as_ref().map(|key| {
                    Arc::new(OpenAiCompatibleProvider::new(
                        "groq",
                        key,
                        &config.groq_api_base,
                        &config.groq_model,
                    )) as Arc<dyn AiProvider>
                }),
                ProviderKind::Gemini => config.gemini_api_key.as_ref().map(|key| {
                    Arc::new(GeminiProvider::new(
                        http_client.clone(),
                        &config.gemini_api_url,
                        key,
                    )) as Arc<dyn AiProvider>
                }),
            }
        })
        .collect()
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "studybot_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
