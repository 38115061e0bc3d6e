//! Identifier normalization
//!
//! An identifier is both a note's file stem and the literal text inside every
//! `[[...]]` marker that points at it. Normalization only removes characters
//! that are illegal in file names on common filesystems and caps the length;
//! case and spacing are kept so a wikilink's visible text is the identifier.

/// Characters stripped from topics before they become identifiers
pub const ILLEGAL_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum identifier length, in characters
pub const MAX_IDENTIFIER_CHARS: usize = 100;

/// Extension used for note files
pub const NOTE_EXTENSION: &str = "md";

/// Map a topic or concept name to its identifier.
///
/// Pure and deterministic. `normalize(&normalize(x)) == normalize(x)` for
/// every input.
///
/// ```
/// use delve_core::identifier::normalize;
///
/// assert_eq!(normalize("A/B Testing"), "AB Testing");
/// assert_eq!(normalize("Quantum Mechanics"), "Quantum Mechanics");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .take(MAX_IDENTIFIER_CHARS)
        .collect()
}

/// Whether `text` is already its own identifier
pub fn is_canonical(text: &str) -> bool {
    normalize(text) == text
}

/// File name (`<identifier>.md`) of the note created for `topic`
pub fn note_file_name(topic: &str) -> String {
    format!("{}.{}", normalize(topic), NOTE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_every_illegal_char() {
        assert_eq!(normalize(r#"a<b>c:d"e/f\g|h?i*j"#), "abcdefghij");
    }

    #[test]
    fn test_slash_removed_without_space() {
        assert_eq!(normalize("A/B Testing"), "AB Testing");
        assert_eq!(note_file_name("A/B Testing"), "AB Testing.md");
    }

    #[test]
    fn test_case_and_spacing_preserved() {
        assert_eq!(normalize("  General  Relativity "), "  General  Relativity ");
        assert_eq!(normalize("mRNA Vaccine"), "mRNA Vaccine");
    }

    #[test]
    fn test_truncates_to_100_chars() {
        let long = "x".repeat(150);
        assert_eq!(normalize(&long).chars().count(), MAX_IDENTIFIER_CHARS);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let long = "é".repeat(120);
        let id = normalize(&long);
        assert_eq!(id.chars().count(), 100);
        assert_eq!(id.len(), 200);
    }

    #[test]
    fn test_truncation_happens_after_stripping() {
        let input = format!("{}{}", "?".repeat(10), "a".repeat(100));
        assert_eq!(normalize(&input), "a".repeat(100));
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("Chlorophyll"));
        assert!(!is_canonical("What is DNA?"));
        assert!(!is_canonical(&"y".repeat(101)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn normalized_has_no_illegal_chars_and_bounded_len(topic in "\\PC{0,160}") {
            let id = normalize(&topic);
            prop_assert!(!id.contains(&ILLEGAL_CHARS[..]));
            prop_assert!(id.chars().count() <= MAX_IDENTIFIER_CHARS);
        }

        #[test]
        fn normalize_is_idempotent(topic in "\\PC{0,160}") {
            let once = normalize(&topic);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalized_output_is_canonical(topic in "[a-zA-Z <>:\"/\\\\|?*]{0,200}") {
            prop_assert!(is_canonical(&normalize(&topic)));
        }
    }
}
