//! Research and classification collaborator traits

use async_trait::async_trait;
use thiserror::Error;

/// Result type for collaborator calls
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Failures from an external collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// Request never got a response
    #[error("HTTP error: {0}")]
    Http(String),

    /// Service answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Response could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Collaborator produced no text
    #[error("Empty response")]
    Empty,
}

/// A single classification call: system instruction plus user prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRequest {
    /// System message
    pub system: String,
    /// User message
    pub prompt: String,
    /// Upper bound on response tokens
    pub max_tokens: u32,
}

impl ClassificationRequest {
    /// Create a request
    pub fn new(system: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// Produces research content for a topic
#[async_trait]
pub trait Researcher: Send + Sync {
    /// Research `topic` and return free-text (markdown) content
    async fn research(&self, topic: &str) -> CollaboratorResult<String>;

    /// Name used in log output
    fn name(&self) -> &str;
}

/// Answers short classification prompts with free text
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Run one classification prompt
    async fn classify(&self, request: ClassificationRequest) -> CollaboratorResult<String>;

    /// Name used in log output
    fn name(&self) -> &str;
}
