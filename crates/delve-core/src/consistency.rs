//! Queue/filename consistency checks
//!
//! A queued identifier must re-normalize to itself, otherwise the note
//! written for it will live under a different name than the links that
//! point at it. These checks only report; nothing is rewritten.

use crate::identifier::normalize;
use std::collections::HashMap;
use tracing::warn;

/// Consistency of one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyEntry {
    /// Identifier as queued or linked
    pub identifier: String,
    /// Stem of the file a note for it would be written to
    pub future_stem: String,
}

impl ConsistencyEntry {
    /// Whether the identifier and its future file stem agree
    pub fn is_consistent(&self) -> bool {
        self.identifier == self.future_stem
    }
}

/// Identifier → round-trips unchanged through normalization
pub fn check<I, S>(identifiers: I) -> HashMap<String, bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    report(identifiers)
        .into_iter()
        .map(|entry| {
            let consistent = entry.is_consistent();
            (entry.identifier, consistent)
        })
        .collect()
}

/// Ordered per-identifier report, for display
pub fn report<I, S>(identifiers: I) -> Vec<ConsistencyEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    identifiers
        .into_iter()
        .map(|id| {
            let identifier = id.as_ref().to_string();
            let future_stem = normalize(&identifier);
            ConsistencyEntry {
                identifier,
                future_stem,
            }
        })
        .collect()
}

/// Log a warning for every identifier that will not match its filename.
/// Returns the number of mismatches.
pub fn warn_inconsistent<I, S>(identifiers: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    report(identifiers)
        .iter()
        .filter(|entry| !entry.is_consistent())
        .inspect(|entry| {
            warn!(
                "Concept {:?} will not match filename {:?}",
                entry.identifier, entry.future_stem
            )
        })
        .count()
}
