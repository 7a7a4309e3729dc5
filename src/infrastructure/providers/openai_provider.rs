use crate::domain::ai::{AiProvider, ProviderError};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 2000;

/// Chat-completions provider for any OpenAI-compatible endpoint (Groq by
/// default).
pub struct OpenAiCompatibleProvider {
    name: String,
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: impl Into<String>, api_key: &str, api_base: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            name: name.into(),
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    async fn call(&self, prompt: &str) -> Result<String, ProviderError> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(classify)?
            .into();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message])
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build()
            .map_err(classify)?;

        let response = self.client.chat().create(request).await.map_err(classify)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("response has no message content".to_string())
            })
    }
}

#[async_trait]
impl AiProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, ProviderError> {
        if prompt.trim().is_empty() {
            return Err(ProviderError::InvalidRequest("prompt must not be empty".to_string()));
        }

        let start_time = std::time::Instant::now();
        tracing::debug!(
            provider = %self.name,
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling chat completions API"
        );

        // The client retries rate limits and server errors internally, so the
        // deadline has to wrap the whole call.
        let content = tokio::time::timeout(timeout, self.call(prompt))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))??;

        tracing::info!(
            provider = %self.name,
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            response_length = content.len(),
            "Chat completion received"
        );

        Ok(content)
    }
}

fn classify(err: OpenAIError) -> ProviderError {
    match err {
        OpenAIError::Reqwest(e) => ProviderError::Network(e.to_string()),
        OpenAIError::ApiError(api) => {
            let kind = api.r#type.as_deref().unwrap_or_default();
            if kind == "insufficient_quota" || kind == "rate_limit_exceeded" {
                ProviderError::RateLimited(api.message)
            } else if api.message.to_ascii_lowercase().contains("api key") {
                ProviderError::Auth(api.message)
            } else {
                ProviderError::Upstream {
                    status: None,
                    message: api.message,
                }
            }
        }
        OpenAIError::JSONDeserialize(e) => ProviderError::MalformedResponse(e.to_string()),
        OpenAIError::InvalidArgument(msg) => ProviderError::InvalidRequest(msg),
        other => ProviderError::Upstream {
            status: None,
            message: other.to_string(),
        },
    }
}
