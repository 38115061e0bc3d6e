//! Existing-note discovery
//!
//! Asks the classifier which notes already in the vault relate to freshly
//! linked content. Suggestions that do not name a real note are dropped.

use crate::prompts::{existing_link_prompt, EXISTING_LINK_SYSTEM_PROMPT, NO_MATCHES};
use crate::traits::{ClassificationRequest, Classifier};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default token cap for the existing-link call
pub const DEFAULT_LINK_MAX_TOKENS: u32 = 200;

/// Parse a comma-separated suggestion list against the known identifiers.
///
/// `none` (any case) means no suggestions. Items are trimmed of whitespace,
/// quotes and wikilink brackets; unknown or repeated titles are dropped.
pub fn parse_suggestions(raw: &str, known: &BTreeSet<String>) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(NO_MATCHES) {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    raw.split([',', '\n'])
        .map(clean_title)
        .filter(|title| !title.is_empty())
        .filter(|title| {
            let known_title = known.contains(*title);
            if !known_title {
                debug!("Ignoring suggestion for unknown note {:?}", title);
            }
            known_title
        })
        .filter(|title| seen.insert(*title))
        .map(str::to_string)
        .collect()
}

fn clean_title(item: &str) -> &str {
    let item = item.trim().trim_start_matches("- ").trim();
    let item = item.trim_matches(|c: char| c == '"' || c == '\'' || c == '`');
    let item = item
        .strip_prefix("[[")
        .and_then(|s| s.strip_suffix("]]"))
        .unwrap_or(item);
    item.trim()
}

/// Classifier-driven related-note finder
pub struct ExistingLinkFinder {
    classifier: Arc<dyn Classifier>,
    max_tokens: u32,
}

impl ExistingLinkFinder {
    /// Create a finder backed by `classifier`
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            max_tokens: DEFAULT_LINK_MAX_TOKENS,
        }
    }

    /// Override the token cap
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Existing notes relevant to `content`.
    ///
    /// Skips the call when the vault is empty. Any failure yields an empty
    /// list.
    pub async fn find(&self, content: &str, known: &BTreeSet<String>) -> Vec<String> {
        if known.is_empty() {
            return Vec::new();
        }

        let request = ClassificationRequest::new(
            EXISTING_LINK_SYSTEM_PROMPT,
            existing_link_prompt(content, known),
            self.max_tokens,
        );

        match self.classifier.classify(request).await {
            Ok(raw) => parse_suggestions(&raw, known),
            Err(e) => {
                warn!(
                    "Existing-link discovery via {} failed: {}",
                    self.classifier.name(),
                    e
                );
                Vec::new()
            }
        }
    }
}
