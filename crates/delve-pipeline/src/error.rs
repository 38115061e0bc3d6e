use delve_core::{CollaboratorError, StoreError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Reasons a topic could not be processed
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The research collaborator failed
    #[error("Research failed for {topic:?}: {source}")]
    ResearchFailed {
        /// Topic being researched
        topic: String,
        /// Underlying collaborator error
        #[source]
        source: CollaboratorError,
    },

    /// The research collaborator returned no content
    #[error("Research returned no content for {topic:?}")]
    EmptyResearch {
        /// Topic being researched
        topic: String,
    },

    /// Topic normalizes to an empty identifier
    #[error("Topic {0:?} has no characters usable in a file name")]
    InvalidTopic(String),

    /// A note for the topic already exists
    #[error("Note for {topic:?} already exists: {}", path.display())]
    AlreadyExists {
        /// Topic as given
        topic: String,
        /// Existing note
        path: PathBuf,
    },

    /// Vault or queue I/O failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Frontmatter could not be serialized
    #[error("Failed to render note: {0}")]
    Render(#[from] serde_yaml::Error),
}

impl PipelineError {
    /// Whether the run stopped before anything was written
    pub fn is_side_effect_free(&self) -> bool {
        matches!(
            self,
            Self::ResearchFailed { .. }
                | Self::EmptyResearch { .. }
                | Self::InvalidTopic(_)
                | Self::AlreadyExists { .. }
        )
    }
}
