//! OpenAI Chat Completions classifier

use crate::client::OpenAIConfig;
use async_trait::async_trait;
use delve_core::{ClassificationRequest, Classifier, CollaboratorError, CollaboratorResult};
use serde::Deserialize;
use tracing::debug;

/// Small-model classifier backed by `POST {endpoint}/chat/completions`
#[derive(Debug, Clone)]
pub struct OpenAIChatClassifier {
    config: OpenAIConfig,
    model: String,
    temperature: f64,
}

impl OpenAIChatClassifier {
    /// Create a classifier for `model` at temperature 0.1
    pub fn new(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            config,
            model: model.into(),
            temperature: 0.1,
        }
    }

    /// Sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    fn request_body(&self, request: &ClassificationRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": self.temperature,
            "max_tokens": request.max_tokens,
        })
    }
}

#[async_trait]
impl Classifier for OpenAIChatClassifier {
    async fn classify(&self, request: ClassificationRequest) -> CollaboratorResult<String> {
        let response: ChatResponse = self
            .config
            .post_json("chat/completions", &self.request_body(&request))
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CollaboratorError::InvalidResponse("No choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        debug!("Classifier answered: {}", content.trim());
        Ok(content.trim().to_string())
    }

    fn name(&self) -> &str {
        "openai-chat"
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
