//! OpenAI Responses API research provider

use crate::client::OpenAIConfig;
use async_trait::async_trait;
use delve_core::prompts::research_prompt;
use delve_core::{CollaboratorError, CollaboratorResult, Researcher};
use serde::Deserialize;
use tracing::{debug, info};

/// Deep-research provider backed by `POST {endpoint}/responses` with the
/// web search tool enabled
#[derive(Debug, Clone)]
pub struct OpenAIResearchProvider {
    config: OpenAIConfig,
    model: String,
}

impl OpenAIResearchProvider {
    /// Create a provider for `model`
    pub fn new(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            config,
            model: model.into(),
        }
    }

    fn request_body(&self, topic: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "input": [{
                "role": "user",
                "content": [{
                    "type": "input_text",
                    "text": research_prompt(topic),
                }],
            }],
            "tools": [{ "type": "web_search_preview" }],
        })
    }
}

#[async_trait]
impl Researcher for OpenAIResearchProvider {
    async fn research(&self, topic: &str) -> CollaboratorResult<String> {
        info!("Researching {:?} with {}", topic, self.model);
        let response: ResponsesResponse = self
            .config
            .post_json("responses", &self.request_body(topic))
            .await?;

        let text = response.text();
        debug!("Research returned {} chars", text.len());
        if text.trim().is_empty() {
            return Err(CollaboratorError::Empty);
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        "openai-responses"
    }
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesResponse {
    /// Convenience `output_text` wins; otherwise every output_text block of
    /// every message item, in order
    fn text(self) -> String {
        if let Some(text) = self.output_text.filter(|t| !t.trim().is_empty()) {
            return text;
        }
        self.output
            .into_iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content)
            .filter(|block| block.kind == "output_text")
            .filter_map(|block| block.text)
            .collect()
    }
}
