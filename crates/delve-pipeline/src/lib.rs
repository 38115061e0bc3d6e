//! # Delve Pipeline
//!
//! Sequencing for one topic ([`ResearchPipeline`]) and for draining the work
//! queue one entry at a time ([`QueueRunner`]).
//!
//! ```text
//! START -> RESEARCH -> LINK -> DISCOVER_EXISTING_LINKS -> WRITE_NOTE
//!       -> EXTRACT_NEW_CONCEPTS -> ENQUEUE -> DONE
//! ```
//!
//! `FAILED` is reachable only from `RESEARCH`. Every later collaborator step
//! degrades to an empty result instead of failing.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod research_pipeline;
mod runner;

pub use error::{PipelineError, PipelineResult};
pub use research_pipeline::{PipelineContext, PipelineStage, ResearchPipeline, ResearchReport};
pub use runner::{PopOutcome, PopSummary, QueueRunner};
