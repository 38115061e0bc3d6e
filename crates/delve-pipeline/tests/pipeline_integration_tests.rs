//! Integration tests for ResearchPipeline and QueueRunner
//!
//! Collaborators are scripted doubles; the vault and queue live in a temp
//! directory.

use delve_core::test_support::{MockClassifier, MockResearcher};
use delve_core::{ConceptLinker, ExistingLinkFinder, QueueFile, Vault};
use delve_pipeline::{PipelineContext, PipelineError, PopOutcome, QueueRunner, ResearchPipeline};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const TEMPLATE: &str = "Simple_Note_Template.md";

struct Fixture {
    _dir: TempDir,
    vault_dir: PathBuf,
    queue_path: PathBuf,
    researcher: MockResearcher,
    concepts: MockClassifier,
    related: MockClassifier,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let vault_dir = dir.path().join("vault");
        fs::create_dir_all(&vault_dir).unwrap();
        fs::write(vault_dir.join(TEMPLATE), "---\ntitle:\n---\n").unwrap();
        let queue_path = dir.path().join("queue.txt");
        Self {
            _dir: dir,
            vault_dir,
            queue_path,
            researcher: MockResearcher::new(),
            concepts: MockClassifier::new(),
            related: MockClassifier::new(),
        }
    }

    fn pipeline(&self) -> ResearchPipeline {
        ResearchPipeline::new(PipelineContext {
            vault: Vault::new(&self.vault_dir).with_template(TEMPLATE),
            queue: QueueFile::new(&self.queue_path),
            researcher: Arc::new(self.researcher.clone()),
            linker: ConceptLinker::new(Arc::new(self.concepts.clone())),
            finder: ExistingLinkFinder::new(Arc::new(self.related.clone())),
        })
    }

    fn runner(&self) -> QueueRunner {
        QueueRunner::new(self.pipeline())
    }

    fn queue(&self) -> QueueFile {
        QueueFile::new(&self.queue_path)
    }

    fn seed_queue(&self, entries: &[&str]) {
        let entries: Vec<String> = entries.iter().map(|s| s.to_string()).collect();
        self.queue().write(&entries).unwrap();
    }

    fn add_note(&self, id: &str) {
        fs::write(self.vault_dir.join(format!("{id}.md")), "existing").unwrap();
    }

    fn note(&self, id: &str) -> String {
        fs::read_to_string(self.vault_dir.join(format!("{id}.md"))).unwrap()
    }

    fn note_count(&self) -> usize {
        fs::read_dir(&self.vault_dir)
            .unwrap()
            .filter(|e| e.as_ref().unwrap().file_name() != TEMPLATE)
            .count()
    }
}

// ============================================================================
// ResearchPipeline
// ============================================================================

#[tokio::test]
async fn test_photosynthesis_end_to_end() {
    let fx = Fixture::new();
    fx.researcher.push_response(
        "## Summary\nPhotosynthesis depends on chlorophyll. Chlorophyll absorbs light.\n\n## Related Notes\n",
    );
    fx.concepts.push_response("Chlorophyll\n");

    let report = fx.pipeline().run("Photosynthesis").await.unwrap();

    let note = fx.note("Photosynthesis");
    assert!(note.starts_with("---\ntitle: Photosynthesis\n"));
    assert!(note.contains("depends on [[Chlorophyll]]. [[Chlorophyll]] absorbs"));
    assert_eq!(fx.queue().read().unwrap(), vec!["Chlorophyll"]);
    assert_eq!(report.identifier, "Photosynthesis");
    assert_eq!(report.linked_concepts, vec!["Chlorophyll"]);
    assert_eq!(report.enqueued, 1);

    // Empty vault: the related-note classifier is never consulted
    assert!(fx.related.calls().is_empty());
}

#[tokio::test]
async fn test_research_failure_has_no_side_effects() {
    let fx = Fixture::new();
    fx.seed_queue(&["Existing Entry"]);
    fx.researcher.push_failure("connection refused");

    let err = fx.pipeline().run("Photosynthesis").await.unwrap_err();

    assert!(matches!(err, PipelineError::ResearchFailed { .. }));
    assert_eq!(fx.note_count(), 0);
    assert_eq!(fx.queue().read().unwrap(), vec!["Existing Entry"]);
    assert!(fx.concepts.calls().is_empty());
}

#[tokio::test]
async fn test_empty_research_has_no_side_effects() {
    let fx = Fixture::new();
    fx.researcher.push_response("");

    let err = fx.pipeline().run("Photosynthesis").await.unwrap_err();

    assert!(matches!(err, PipelineError::EmptyResearch { .. }));
    assert_eq!(fx.note_count(), 0);
    assert!(!fx.queue_path.exists());
}

#[tokio::test]
async fn test_classifier_failure_still_writes_note() {
    let fx = Fixture::new();
    fx.researcher.push_response("Plain text about Glucose.");
    fx.concepts.push_failure("timeout");

    let report = fx.pipeline().run("Sugar").await.unwrap();

    assert!(fx.note("Sugar").ends_with("Plain text about Glucose."));
    assert!(report.linked_concepts.is_empty());
    assert!(fx.queue().read().unwrap().is_empty());
}

#[tokio::test]
async fn test_existing_notes_block_uses_known_suggestions_only() {
    let fx = Fixture::new();
    fx.add_note("Gravity");
    fx.researcher
        .push_response("Orbits follow from gravitation.\n\n## Related Notes\n- Kepler\n");
    fx.related.push_response("Gravity, Not A Note");

    let report = fx.pipeline().run("Orbits").await.unwrap();

    assert_eq!(report.existing_links, vec!["Gravity"]);
    let note = fx.note("Orbits");
    assert!(note.contains("### Existing Notes\n- [[Gravity]]\n\n## Related Notes\n- Kepler"));
    assert!(!note.contains("Not A Note"));
    assert!(fx.queue().read().unwrap().is_empty());
}

#[tokio::test]
async fn test_known_concepts_are_not_relinked_or_queued() {
    let fx = Fixture::new();
    fx.add_note("Chlorophyll");
    fx.researcher
        .push_response("Chlorophyll and carotenoids capture light.");
    fx.concepts.push_response("Chlorophyll\nCarotenoids");

    let report = fx.pipeline().run("Pigments").await.unwrap();

    assert_eq!(report.linked_concepts, vec!["Carotenoids"]);
    let note = fx.note("Pigments");
    assert!(note.contains("Chlorophyll and [[Carotenoids]] capture"));
    assert_eq!(fx.queue().read().unwrap(), vec!["Carotenoids"]);
}

#[tokio::test]
async fn test_slash_removed_from_identifier() {
    let fx = Fixture::new();
    fx.researcher.push_response("Split traffic between variants.");

    let report = fx.pipeline().run("A/B Testing").await.unwrap();

    assert_eq!(report.identifier, "AB Testing");
    assert!(fx.vault_dir.join("AB Testing.md").is_file());
    assert!(fx.note("AB Testing").starts_with("---\ntitle: A/B Testing\n"));
}

#[tokio::test]
async fn test_dangling_links_from_research_are_queued_once() {
    let fx = Fixture::new();
    fx.seed_queue(&["Mitochondria"]);
    fx.researcher
        .push_response("See [[Mitochondria]] and [[ATP]], and again [[ATP]].");

    let report = fx.pipeline().run("Cell Energy").await.unwrap();

    assert_eq!(report.new_concepts, vec!["Mitochondria", "ATP"]);
    assert_eq!(report.enqueued, 1);
    assert_eq!(fx.queue().read().unwrap(), vec!["Mitochondria", "ATP"]);
}

#[tokio::test]
async fn test_existing_note_is_never_overwritten() {
    let fx = Fixture::new();
    fx.add_note("Gravity");
    fx.researcher.push_response("Fresh text.");

    let err = fx.pipeline().run("Gravity").await.unwrap_err();

    assert!(matches!(err, PipelineError::AlreadyExists { ref topic, .. } if topic == "Gravity"));
    assert!(err.is_side_effect_free());
    assert!(fx.researcher.topics().is_empty());
    assert_eq!(fx.note("Gravity"), "existing");
    assert!(fx.queue().read().unwrap().is_empty());
}

#[tokio::test]
async fn test_unusable_link_targets_are_not_queued() {
    let fx = Fixture::new();
    fx.researcher.push_response("Odd marker [[???]] and [[Mass]].");

    let report = fx.pipeline().run("Gravity").await.unwrap();

    assert_eq!(report.new_concepts, vec!["Mass"]);
    assert_eq!(fx.queue().read().unwrap(), vec!["Mass"]);
}

// ============================================================================
// QueueRunner
// ============================================================================

#[tokio::test]
async fn test_pop_empty_queue() {
    let fx = Fixture::new();
    let outcome = fx.runner().pop_one().await.unwrap();
    assert!(matches!(outcome, PopOutcome::Empty));
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn test_pop_skips_existing_note() {
    let fx = Fixture::new();
    fx.add_note("Gravity");
    fx.seed_queue(&["Gravity", "Mass"]);

    let outcome = fx.runner().pop_one().await.unwrap();

    assert!(matches!(outcome, PopOutcome::Skipped(ref t) if t == "Gravity"));
    assert_eq!(fx.queue().read().unwrap(), vec!["Mass"]);
    assert!(fx.researcher.topics().is_empty());
}

#[tokio::test]
async fn test_pop_keeps_concepts_enqueued_by_the_run() {
    let fx = Fixture::new();
    fx.seed_queue(&["Photosynthesis"]);
    fx.researcher
        .push_response("Photosynthesis needs Chlorophyll.");
    fx.concepts.push_response("Chlorophyll");

    let outcome = fx.runner().pop_one().await.unwrap();

    assert!(matches!(outcome, PopOutcome::Researched(_)));
    assert_eq!(fx.queue().read().unwrap(), vec!["Chlorophyll"]);
    assert_eq!(fx.researcher.topics(), vec!["Photosynthesis"]);
}

#[tokio::test]
async fn test_pop_failure_leaves_queue_untouched() {
    let fx = Fixture::new();
    fx.seed_queue(&["Photosynthesis", "Gravity"]);
    fx.researcher.push_failure("503");

    let outcome = fx.runner().pop_one().await.unwrap();

    assert!(matches!(outcome, PopOutcome::Failed { ref topic, .. } if topic == "Photosynthesis"));
    assert_eq!(fx.queue().read().unwrap(), vec!["Photosynthesis", "Gravity"]);
    assert_eq!(fx.note_count(), 0);
}

#[tokio::test]
async fn test_pop_count_stops_at_first_failure() {
    let fx = Fixture::new();
    fx.seed_queue(&["Alpha", "Beta", "Gamma"]);
    fx.researcher.push_response("About alpha.");
    fx.researcher.push_failure("boom");

    let summary = fx.runner().pop(3).await.unwrap();

    assert_eq!(summary.requested, 3);
    assert_eq!(summary.succeeded, 1);
    assert!(!summary.is_complete());
    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(fx.queue().read().unwrap(), vec!["Beta", "Gamma"]);
    assert_eq!(fx.researcher.topics(), vec!["Alpha", "Beta"]);
}

#[tokio::test]
async fn test_pop_count_past_end_of_queue_is_incomplete() {
    let fx = Fixture::new();
    fx.seed_queue(&["Alpha"]);
    fx.researcher.push_response("About alpha.");

    let summary = fx.runner().pop(2).await.unwrap();

    assert_eq!(summary.succeeded, 1);
    assert!(matches!(summary.outcomes.last(), Some(PopOutcome::Empty)));
    assert!(fx.queue().read().unwrap().is_empty());
}

#[tokio::test]
async fn test_pop_drops_unusable_entry_and_moves_on() {
    let fx = Fixture::new();
    fx.seed_queue(&["???", "Mass"]);
    fx.researcher.push_response("Mass resists acceleration.");

    let summary = fx.runner().pop(2).await.unwrap();

    assert!(summary.is_complete());
    assert!(matches!(summary.outcomes[0], PopOutcome::Discarded(ref t) if t == "???"));
    assert!(matches!(summary.outcomes[1], PopOutcome::Researched(_)));
    assert_eq!(fx.researcher.topics(), vec!["Mass"]);
    assert!(fx.queue().read().unwrap().is_empty());
}
