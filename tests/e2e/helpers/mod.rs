use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;

use studybot_backend::{
    controllers::{
        chat::ChatController, flashcards::FlashcardController, health::Readiness,
        quiz::QuizController, summary::SummaryController, usage::UsageController,
    },
    domain::{
        ai::{AiGateway, AiProvider, FailoverInvoker},
        chat::ChatService,
        flashcards::FlashcardService,
        quiz::QuizService,
        summary::SummaryService,
        usage::{Feature, FeatureQuota, QuotaGuard},
    },
    infrastructure::{
        http::{create_router, Controllers},
        repositories::{
            InMemoryChatStore, InMemoryFlashcardStore, InMemoryQuizStore, InMemorySummaryStore,
        },
    },
};

pub mod api_client;
pub mod providers;

use api_client::TestClient;
use providers::StubProvider;
use stores::YieldingUsageStore;

pub const PRIMARY: &str = "groq";
pub const SECONDARY: &str = "gemini";

/// Quota settings for one test app
pub struct TestSettings {
    pub daily_limit: u32,
    pub requests_per_minute: u32,
    pub ai_enabled: bool,
}

impl Default for TestSettings {
    fn default() -> Self {
        // 600 rpm means no minimum interval
        Self {
            daily_limit: 3,
            requests_per_minute: 600,
            ai_enabled: true,
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    pub primary: Arc<StubProvider>,
    pub secondary: Arc<StubProvider>,
}

impl TestContext {
    pub fn with_settings(settings: TestSettings) -> Self {
        let primary = Arc::new(StubProvider::new(PRIMARY, Ok("primary reply".to_string())));
        let secondary = Arc::new(StubProvider::new(
            SECONDARY,
            Ok("secondary reply".to_string()),
        ));
        Self::with_providers(settings, primary, secondary)
    }

    pub fn with_providers(
        settings: TestSettings,
        primary: Arc<StubProvider>,
        secondary: Arc<StubProvider>,
    ) -> Self {
        let limits: HashMap<Feature, u32> = Feature::ALL
            .into_iter()
            .map(|feature| (feature, settings.daily_limit))
            .collect();
        let quota = FeatureQuota::new(limits, settings.requests_per_minute, settings.ai_enabled)
            .expect("valid test quota");

        let quota_guard = Arc::new(QuotaGuard::new(Arc::new(YieldingUsageStore::default()), quota));
        let providers: Vec<Arc<dyn AiProvider>> = vec![primary.clone(), secondary.clone()];
        let invoker = Arc::new(FailoverInvoker::new(providers, Duration::from_secs(5)));
        let gateway = Arc::new(AiGateway::new(quota_guard.clone(), invoker));

        let controllers = Controllers {
            chat: Arc::new(ChatController::new(Arc::new(ChatService::new(
                gateway.clone(),
                Arc::new(InMemoryChatStore::new()),
            )))),
            flashcards: Arc::new(FlashcardController::new(Arc::new(FlashcardService::new(
                gateway.clone(),
                Arc::new(InMemoryFlashcardStore::new()),
            )))),
            quiz: Arc::new(QuizController::new(Arc::new(QuizService::new(
                gateway.clone(),
                Arc::new(InMemoryQuizStore::new()),
            )))),
            summary: Arc::new(SummaryController::new(Arc::new(SummaryService::new(
                gateway,
                Arc::new(InMemorySummaryStore::new()),
            )))),
            usage: Arc::new(UsageController::new(quota_guard)),
            readiness: Arc::new(Readiness::InMemory),
        };

        Self {
            client: TestClient::new(create_router(controllers)),
            primary,
            secondary,
        }
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async { TestContext::with_settings(TestSettings::default()) }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

/// JSON array of `count` well-formed flashcards
pub fn flashcards_json(count: usize) -> String {
    let cards: Vec<_> = (1..=count)
        .map(|i| serde_json::json!({ "question": format!("Q{i}"), "answer": format!("A{i}") }))
        .collect();
    serde_json::Value::Array(cards).to_string()
}

/// JSON array of `count` well-formed quiz questions
pub fn quiz_json(count: usize) -> String {
    let questions: Vec<_> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "question": format!("Question {i}?"),
                "options": ["a", "b", "c", "d"],
                "correctAnswerIndex": i % 4,
                "explanation": "because"
            })
        })
        .collect();
    serde_json::Value::Array(questions).to_string()
}
