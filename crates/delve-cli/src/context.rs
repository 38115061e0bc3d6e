//! Wiring from configuration to pipeline

use anyhow::{Context, Result};
use delve_config::DelveConfig;
use delve_core::{ConceptLinker, ExistingLinkFinder, QueueFile, Vault};
use delve_pipeline::{PipelineContext, ResearchPipeline};
use std::sync::Arc;

/// Vault at the configured path, with the template excluded from listings
pub fn vault(config: &DelveConfig) -> Result<Vault> {
    let vault = Vault::new(config.vault_path()?);
    Ok(match config.vault.template_name() {
        Some(name) => vault.with_template(name),
        None => vault,
    })
}

/// Queue at the configured path
pub fn queue(config: &DelveConfig) -> QueueFile {
    QueueFile::new(config.queue_path())
}

/// Validate configuration and build a pipeline backed by the HTTP
/// collaborators
pub fn pipeline(config: &DelveConfig) -> Result<ResearchPipeline> {
    config
        .validate_for_research()
        .context("Configuration is incomplete (run `delve doctor`)")?;

    let (researcher, classifier) = delve_llm::providers_from_config(config)?;
    let classifier = Arc::new(classifier);

    Ok(ResearchPipeline::new(PipelineContext {
        vault: vault(config)?,
        queue: queue(config),
        researcher: Arc::new(researcher),
        linker: ConceptLinker::new(classifier.clone())
            .with_max_tokens(config.llm.concept_max_tokens),
        finder: ExistingLinkFinder::new(classifier).with_max_tokens(config.llm.link_max_tokens),
    }))
}
