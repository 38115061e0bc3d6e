//! Queue runner
//!
//! Pops queue entries one at a time and hands them to the pipeline. An entry
//! leaves the queue only after its note exists.

use crate::error::{PipelineError, PipelineResult};
use crate::research_pipeline::{ResearchPipeline, ResearchReport};
use tracing::{info, warn};

/// Result of processing the head of the queue
#[derive(Debug)]
pub enum PopOutcome {
    /// Nothing queued
    Empty,
    /// A note already existed; the entry was dropped
    Skipped(String),
    /// The entry has no characters usable in a file name; it was dropped
    Discarded(String),
    /// The entry was researched and dropped
    Researched(ResearchReport),
    /// Research failed; the queue is unchanged
    Failed {
        /// Entry that failed
        topic: String,
        /// Why
        error: PipelineError,
    },
}

impl PopOutcome {
    /// Whether this counts toward a `pop [count]` run
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Skipped(_) | Self::Discarded(_) | Self::Researched(_)
        )
    }
}

/// Tally of a multi-entry run
#[derive(Debug, Default)]
pub struct PopSummary {
    /// Entries asked for
    pub requested: usize,
    /// Entries that succeeded
    pub succeeded: usize,
    /// Per-entry outcomes, ending at the first failure
    pub outcomes: Vec<PopOutcome>,
}

impl PopSummary {
    /// Whether every requested entry succeeded
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.requested
    }
}

/// Drains the queue through a [`ResearchPipeline`]
pub struct QueueRunner {
    pipeline: ResearchPipeline,
}

impl QueueRunner {
    /// Create a runner over `pipeline`
    pub fn new(pipeline: ResearchPipeline) -> Self {
        Self { pipeline }
    }

    /// Underlying pipeline
    pub fn pipeline(&self) -> &ResearchPipeline {
        &self.pipeline
    }

    /// Process the head of the queue.
    ///
    /// Research failures come back as [`PopOutcome::Failed`]. Storage errors
    /// are returned as `Err`.
    pub async fn pop_one(&self) -> PipelineResult<PopOutcome> {
        let queue = self.pipeline.queue();
        let Some(topic) = queue.peek()? else {
            info!("Queue is empty");
            return Ok(PopOutcome::Empty);
        };

        if self.pipeline.vault().identifier_for(&topic).is_empty() {
            warn!("Dropping {:?}: no characters usable in a file name", topic);
            queue.remove(&topic)?;
            return Ok(PopOutcome::Discarded(topic));
        }

        if self.pipeline.vault().contains(&topic) {
            info!("Note for {:?} already exists, skipping", topic);
            queue.remove(&topic)?;
            return Ok(PopOutcome::Skipped(topic));
        }

        info!("Processing {:?}", topic);
        match self.pipeline.run(&topic).await {
            Ok(report) => {
                // Re-read so entries queued by this run are kept.
                queue.remove(&topic)?;
                Ok(PopOutcome::Researched(report))
            }
            Err(error) if error.is_side_effect_free() => {
                warn!("Leaving {:?} in the queue: {}", topic, error);
                Ok(PopOutcome::Failed { topic, error })
            }
            Err(error) => Err(error),
        }
    }

    /// Process up to `count` entries, stopping at the first one that does not
    /// succeed
    pub async fn pop(&self, count: usize) -> PipelineResult<PopSummary> {
        self.pop_each(count, |_, _| {}).await
    }

    /// Like [`pop`](Self::pop), calling `observe` with the 1-based item
    /// number and outcome after each entry
    pub async fn pop_each<F>(&self, count: usize, mut observe: F) -> PipelineResult<PopSummary>
    where
        F: FnMut(usize, &PopOutcome),
    {
        let mut summary = PopSummary {
            requested: count,
            ..PopSummary::default()
        };

        for item in 1..=count {
            info!("Processing item {} of {}", item, count);
            let outcome = self.pop_one().await?;
            observe(item, &outcome);
            let success = outcome.is_success();
            summary.outcomes.push(outcome);
            if !success {
                break;
            }
            summary.succeeded += 1;
        }

        info!(
            "Completed: {} of {} items processed successfully",
            summary.succeeded, summary.requested
        );
        Ok(summary)
    }
}
