//! # Delve LLM
//!
//! OpenAI-compatible HTTP implementations of the collaborator traits in
//! `delve-core`.
//!
//! - [`OpenAIResearchProvider`]: Responses API with web search, for research
//! - [`OpenAIChatClassifier`]: Chat Completions, for concept and related-note
//!   classification
//!
//! ## Example
//!
//! ```rust,no_run
//! use delve_core::Researcher;
//! use delve_llm::{OpenAIConfig, OpenAIResearchProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OpenAIConfig::new("sk-...");
//!     let researcher = OpenAIResearchProvider::new(config, "o4-mini-deep-research");
//!     let text = researcher.research("Photosynthesis").await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod chat;
mod client;
mod research;

pub use chat::OpenAIChatClassifier;
pub use client::OpenAIConfig;
pub use research::OpenAIResearchProvider;

use delve_config::{ConfigError, DelveConfig};

/// Build both collaborators from validated configuration
pub fn providers_from_config(
    config: &DelveConfig,
) -> Result<(OpenAIResearchProvider, OpenAIChatClassifier), ConfigError> {
    let api = OpenAIConfig::from_config(config)?;
    let researcher = OpenAIResearchProvider::new(api.clone(), &config.llm.research_model);
    let classifier = OpenAIChatClassifier::new(api, &config.llm.classification_model)
        .with_temperature(config.llm.temperature);
    Ok((researcher, classifier))
}
