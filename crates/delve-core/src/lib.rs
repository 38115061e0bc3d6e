//! # Delve Core
//!
//! Concept-linking and queue-consistency logic for growing a cross-linked
//! markdown knowledge base.
//!
//! ## Modules
//!
//! - [`identifier`]: topic → identifier normalization (file stem and link text)
//! - [`wikilinks`]: `[[...]]` extraction and protected-span scanning
//! - [`store`]: vault listing, note writes and the work queue
//! - [`linker`]: classifier-driven concept discovery and in-place linking
//! - [`related`]: discovery of existing notes relevant to new content
//! - [`consistency`]: queue/filename round-trip checks
//! - [`note`]: frontmatter and note rendering
//! - [`traits`]: research and classification collaborator interfaces
//!
//! Collaborator implementations live in `delve-llm`; sequencing lives in
//! `delve-pipeline`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod consistency;
pub mod identifier;
pub mod linker;
pub mod note;
pub mod prompts;
pub mod related;
pub mod store;
pub mod traits;
pub mod wikilinks;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use consistency::ConsistencyEntry;
pub use identifier::normalize;
pub use linker::{ConceptLinker, LinkOutcome};
pub use note::ResearchNote;
pub use related::ExistingLinkFinder;
pub use store::{QueueFile, StoreError, StoreResult, Vault};
pub use traits::{
    ClassificationRequest, Classifier, CollaboratorError, CollaboratorResult, Researcher,
};
