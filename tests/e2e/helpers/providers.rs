use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use studybot_backend::domain::ai::{AiProvider, ProviderError};

/// Provider that answers from a queue of canned outcomes.
///
/// Once the queue is empty it falls back to its default outcome.
pub struct StubProvider {
    name: String,
    default: Result<String, ProviderError>,
    queue: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new(name: &str, default: Result<String, ProviderError>) -> Self {
        Self {
            name: name.to_string(),
            default,
            queue: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn reply_next(&self, reply: &str) {
        self.queue.lock().push_back(Ok(reply.to_string()));
    }

    pub fn fail_next(&self, error: ProviderError) {
        self.queue.lock().push_back(Err(error));
    }

    pub fn fail_always(name: &str) -> Self {
        Self::new(
            name,
            Err(ProviderError::Upstream {
                status: Some(500),
                message: "internal error".to_string(),
            }),
        )
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }
}

#[async_trait]
impl AiProvider for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &str, _timeout: Duration) -> Result<String, ProviderError> {
        self.prompts.lock().push(prompt.to_string());
        let next = self.queue.lock().pop_front();
        next.unwrap_or_else(|| self.default.clone())
    }
}
