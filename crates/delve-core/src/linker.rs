//! Concept extraction and in-place linking
//!
//! Turns plain research text into linked note content:
//!
//! 1. Ask the classifier which concepts in the text deserve their own note
//! 2. Drop concepts that already have a note
//! 3. Rewrite whole-word, case-insensitive occurrences of each remaining
//!    concept into `[[normalize(concept)]]`, skipping text already inside a
//!    marker
//!
//! Separately, [`new_references`] reports which link targets in a finished
//! note have no note yet. Those become queue entries.
//!
//! Classifier failures never escape this module: they are logged and treated
//! as "no concepts", leaving the content untouched.

use crate::identifier::normalize;
use crate::prompts::{concept_prompt, CONCEPT_SYSTEM_PROMPT};
use crate::traits::{ClassificationRequest, Classifier};
use crate::wikilinks::{extract_targets, overlaps_protected, protected_spans, wikilink};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default token cap for the concept discovery call
pub const DEFAULT_CONCEPT_MAX_TOKENS: u32 = 300;

/// Result of a linking pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOutcome {
    /// Rewritten content
    pub content: String,
    /// Number of spans converted into markers
    pub replacements: usize,
    /// Concepts that produced at least one marker, in processing order
    pub linked: Vec<String>,
}

impl LinkOutcome {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Self::default()
        }
    }
}

/// Link targets in `content` that are not yet notes, in first-seen order.
///
/// Targets with no characters usable in a file name are dropped.
pub fn new_references(content: &str, known: &BTreeSet<String>) -> Vec<String> {
    let targets = extract_targets(content);
    let new: Vec<String> = targets
        .iter()
        .filter(|target| !known.contains(*target) && !normalize(target).is_empty())
        .cloned()
        .collect();
    debug!("Extracted wikilinks: {:?}", targets);
    debug!("New references: {:?}", new);
    new
}

/// Parse the classifier's answer: one concept per line, trimmed, no blanks
pub fn parse_concept_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop concepts that exactly match an existing identifier, and repeats
pub fn filter_known(concepts: Vec<String>, known: &BTreeSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    concepts
        .into_iter()
        .filter(|concept| !known.contains(concept))
        .filter(|concept| seen.insert(concept.clone()))
        .collect()
}

/// Rewrite occurrences of each concept into wikilinks.
///
/// Concepts are applied one full pass at a time. Before each pass the
/// protected spans are recomputed, so markers written by an earlier concept
/// are never rewritten by a later one. With no concepts the content is
/// returned unchanged.
pub fn link_concepts(content: &str, concepts: &[String]) -> LinkOutcome {
    let mut outcome = LinkOutcome::unchanged(content);

    for concept in concepts {
        let identifier = normalize(concept);
        if identifier.trim().is_empty() {
            debug!("Skipping concept {:?}: empty identifier", concept);
            continue;
        }
        let Some(pattern) = concept_pattern(concept) else {
            continue;
        };

        let spans = protected_spans(&outcome.content);
        let marker = wikilink(&identifier);
        let mut rewritten = String::with_capacity(outcome.content.len());
        let mut last = 0;
        let mut count = 0;

        for m in pattern.find_iter(&outcome.content) {
            if overlaps_protected(&spans, &m.range()) {
                continue;
            }
            rewritten.push_str(&outcome.content[last..m.start()]);
            rewritten.push_str(&marker);
            last = m.end();
            count += 1;
        }

        if count == 0 {
            debug!("No matches for concept {:?}", concept);
            continue;
        }

        rewritten.push_str(&outcome.content[last..]);
        debug!("Linked {} occurrence(s) of {:?} as {}", count, concept, marker);
        outcome.content = rewritten;
        outcome.replacements += count;
        outcome.linked.push(concept.clone());
    }

    outcome
}

/// Case-insensitive whole-word pattern for a concept.
///
/// Word boundaries are only asserted on edges that are word characters, so
/// names such as `C++` still match when followed by a space.
fn concept_pattern(concept: &str) -> Option<Regex> {
    let first = concept.chars().next()?;
    let last = concept.chars().next_back()?;
    let lead = if is_word_char(first) { r"\b" } else { "" };
    let trail = if is_word_char(last) { r"\b" } else { "" };

    let source = format!("(?i){lead}{}{trail}", regex::escape(concept));
    match Regex::new(&source) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Cannot build pattern for concept {:?}: {}", concept, e);
            None
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Classifier-driven linker
pub struct ConceptLinker {
    classifier: Arc<dyn Classifier>,
    max_tokens: u32,
}

impl ConceptLinker {
    /// Create a linker backed by `classifier`
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            max_tokens: DEFAULT_CONCEPT_MAX_TOKENS,
        }
    }

    /// Override the token cap for the discovery call
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Ask the classifier for concepts worth their own note.
    ///
    /// Returns an empty list if the call fails or yields nothing.
    pub async fn discover_concepts(&self, topic: &str, content: &str) -> Vec<String> {
        let request = ClassificationRequest::new(
            CONCEPT_SYSTEM_PROMPT,
            concept_prompt(topic, content),
            self.max_tokens,
        );

        match self.classifier.classify(request).await {
            Ok(raw) => {
                debug!("Concept classifier response: {:?}", raw);
                let concepts = parse_concept_list(&raw);
                debug!("Parsed {} concepts: {:?}", concepts.len(), concepts);
                concepts
            }
            Err(e) => {
                warn!(
                    "Concept discovery via {} failed, continuing without new links: {}",
                    self.classifier.name(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Discover, filter and link concepts in `content`
    pub async fn link(&self, topic: &str, content: &str, known: &BTreeSet<String>) -> LinkOutcome {
        let discovered = self.discover_concepts(topic, content).await;
        if discovered.is_empty() {
            debug!("No concepts identified");
            return LinkOutcome::unchanged(content);
        }

        let candidates = filter_known(discovered, known);
        debug!("{} concepts remain after filtering known notes", candidates.len());
        if candidates.is_empty() {
            return LinkOutcome::unchanged(content);
        }

        let outcome = link_concepts(content, &candidates);
        info!(
            "Linked {} concept(s) with {} replacement(s)",
            outcome.linked.len(),
            outcome.replacements
        );
        outcome
    }
}
