//! Wikilink scanning
//!
//! Finds `[[...]]` markers in note content and computes the byte ranges that
//! sit inside an open marker. Those ranges are off-limits for concept
//! linking so an existing link is never wrapped a second time.

use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

static WIKILINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("wikilink regex"));

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// Render a wikilink marker for an identifier
pub fn wikilink(identifier: &str) -> String {
    format!("{OPEN}{identifier}{CLOSE}")
}

/// Interior text of every `[[...]]` marker, trimmed, in first-seen order.
///
/// Empty interiors are dropped and each target is reported once.
pub fn extract_targets(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WIKILINK_REGEX
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .filter(|target| !target.is_empty())
        .filter(|target| seen.insert(*target))
        .map(str::to_string)
        .collect()
}

/// Byte ranges of `content` that lie inside a wikilink marker.
///
/// A range starts at an unmatched `[[` and ends after the `]]` that closes
/// it (or at the end of content when it is never closed). Stray `]]` with no
/// open marker are ignored, so they cannot cancel out a later `[[`.
pub fn protected_spans(content: &str) -> Vec<Range<usize>> {
    let bytes = content.as_bytes();
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut span_start = 0usize;
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        match &bytes[i..i + 2] {
            b"[[" => {
                if depth == 0 {
                    span_start = i;
                }
                depth += 1;
                i += 2;
            }
            b"]]" => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        spans.push(span_start..i + 2);
                    }
                }
                i += 2;
            }
            _ => i += 1,
        }
    }

    if depth > 0 {
        spans.push(span_start..content.len());
    }
    spans
}

/// Whether `range` overlaps any protected span
pub fn overlaps_protected(spans: &[Range<usize>], range: &Range<usize>) -> bool {
    // spans are sorted and disjoint
    let idx = spans.partition_point(|span| span.end <= range.start);
    spans
        .get(idx)
        .is_some_and(|span| span.start < range.end)
}
