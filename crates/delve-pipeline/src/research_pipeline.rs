//! Research orchestrator
//!
//! Carries one topic from research to a written note and queued follow-ups.
//! Only the research step can abort; when it does, nothing has been written.

use crate::error::{PipelineError, PipelineResult};
use chrono::Local;
use delve_core::linker::new_references;
use delve_core::{
    consistency, CollaboratorError, ConceptLinker, ExistingLinkFinder, QueueFile, ResearchNote,
    Researcher, Vault,
};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

/// States a topic moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Nothing done yet
    Start,
    /// Waiting on the research collaborator
    Research,
    /// Discovering and linking concepts in the research text
    Link,
    /// Looking for existing notes worth linking
    DiscoverExistingLinks,
    /// Rendering and writing the note
    WriteNote,
    /// Collecting link targets without a note
    ExtractNewConcepts,
    /// Appending new identifiers to the queue
    Enqueue,
    /// Finished successfully
    Done,
    /// Aborted without side effects
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "START",
            Self::Research => "RESEARCH",
            Self::Link => "LINK",
            Self::DiscoverExistingLinks => "DISCOVER_EXISTING_LINKS",
            Self::WriteNote => "WRITE_NOTE",
            Self::ExtractNewConcepts => "EXTRACT_NEW_CONCEPTS",
            Self::Enqueue => "ENQUEUE",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Storage locations and collaborators for one pipeline
pub struct PipelineContext {
    /// Note storage
    pub vault: Vault,
    /// Work queue
    pub queue: QueueFile,
    /// Research collaborator
    pub researcher: Arc<dyn Researcher>,
    /// Concept discovery and linking
    pub linker: ConceptLinker,
    /// Related-note discovery
    pub finder: ExistingLinkFinder,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchReport {
    /// Topic as given
    pub topic: String,
    /// Identifier the note was stored under
    pub identifier: String,
    /// Written note
    pub note_path: PathBuf,
    /// Concepts linked into the body
    pub linked_concepts: Vec<String>,
    /// Existing notes listed in the "Existing Notes" block
    pub existing_links: Vec<String>,
    /// Link targets that had no note yet
    pub new_concepts: Vec<String>,
    /// How many of those were newly added to the queue
    pub enqueued: usize,
    /// Stages visited, in order
    pub stages: Vec<PipelineStage>,
}

/// Strictly sequential research pipeline
pub struct ResearchPipeline {
    context: PipelineContext,
}

impl ResearchPipeline {
    /// Create a pipeline over `context`
    pub fn new(context: PipelineContext) -> Self {
        Self { context }
    }

    /// Note storage
    pub fn vault(&self) -> &Vault {
        &self.context.vault
    }

    /// Work queue
    pub fn queue(&self) -> &QueueFile {
        &self.context.queue
    }

    /// Research `topic` and write its note.
    ///
    /// Returns [`PipelineError::InvalidTopic`],
    /// [`PipelineError::AlreadyExists`], [`PipelineError::ResearchFailed`] or
    /// [`PipelineError::EmptyResearch`] before any file is touched. Storage
    /// errors after that point propagate unchanged.
    pub async fn run(&self, topic: &str) -> PipelineResult<ResearchReport> {
        let mut stages = vec![PipelineStage::Start];
        let identifier = self.context.vault.identifier_for(topic);
        if identifier.is_empty() {
            error!("Topic {:?} has no usable characters", topic);
            return Err(PipelineError::InvalidTopic(topic.to_string()));
        }
        if self.context.vault.contains(topic) {
            let path = self.context.vault.note_path(topic);
            info!("Note for {:?} already exists at {}", topic, path.display());
            return Err(PipelineError::AlreadyExists {
                topic: topic.to_string(),
                path,
            });
        }

        enter(&mut stages, PipelineStage::Research);
        let content = match self.research(topic).await {
            Ok(content) => content,
            Err(e) => {
                enter(&mut stages, PipelineStage::Failed);
                error!("{}", e);
                return Err(e);
            }
        };

        enter(&mut stages, PipelineStage::Link);
        let known = self.context.vault.known_identifiers()?;
        let linked = self.context.linker.link(topic, &content, &known).await;

        enter(&mut stages, PipelineStage::DiscoverExistingLinks);
        let existing_links = self.context.finder.find(&linked.content, &known).await;
        debug!("Existing notes to link: {:?}", existing_links);

        enter(&mut stages, PipelineStage::WriteNote);
        let note = ResearchNote::new(topic, &linked.content, &existing_links, Local::now());
        let note_path = self.context.vault.write_note(topic, &note.render()?)?;
        info!("Created note {}", note_path.display());

        enter(&mut stages, PipelineStage::ExtractNewConcepts);
        let known = self.context.vault.known_identifiers()?;
        let new_concepts = new_references(&note.body, &known);

        enter(&mut stages, PipelineStage::Enqueue);
        let mismatches = consistency::warn_inconsistent(&new_concepts);
        let enqueued = self.context.queue.enqueue_all(&new_concepts)?;
        info!(
            "Queued {} of {} new concept(s) for {:?} ({} inconsistent)",
            enqueued,
            new_concepts.len(),
            topic,
            mismatches
        );

        enter(&mut stages, PipelineStage::Done);
        Ok(ResearchReport {
            topic: topic.to_string(),
            identifier,
            note_path,
            linked_concepts: linked.linked,
            existing_links,
            new_concepts,
            enqueued,
            stages,
        })
    }

    async fn research(&self, topic: &str) -> PipelineResult<String> {
        let researcher = &self.context.researcher;
        info!("Researching {:?} via {}", topic, researcher.name());
        match researcher.research(topic).await {
            Ok(content) if !content.trim().is_empty() => Ok(content),
            Ok(_) | Err(CollaboratorError::Empty) => Err(PipelineError::EmptyResearch {
                topic: topic.to_string(),
            }),
            Err(source) => Err(PipelineError::ResearchFailed {
                topic: topic.to_string(),
                source,
            }),
        }
    }
}

fn enter(stages: &mut Vec<PipelineStage>, stage: PipelineStage) {
    if let Some(previous) = stages.last() {
        debug!("{} -> {}", previous, stage);
    }
    stages.push(stage);
}
