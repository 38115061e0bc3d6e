//! Prompt templates for the research and classification collaborators

/// Characters of note content shown to the existing-link classifier
pub const EXISTING_LINK_CONTEXT_CHARS: usize = 1000;

/// Literal answer meaning "no related notes"
pub const NO_MATCHES: &str = "none";

/// System message for concept discovery
pub const CONCEPT_SYSTEM_PROMPT: &str = "You identify key concepts in research notes that deserve \
their own linked note. Return only concept names, one per line.";

/// System message for existing-link discovery
pub const EXISTING_LINK_SYSTEM_PROMPT: &str =
    "You identify relevant connections between research notes.";

/// Research prompt for a topic
pub fn research_prompt(topic: &str) -> String {
    format!(
        r#"Research the topic: "{topic}"

Constraints:
- Keep the research brief and shallow; favour breadth over depth
- Cover 3-5 key points at most
- Keep the summary under 200 words
- Do not write wiki links; links are added automatically afterwards

Write a short research note with:
1. A summary of 2-3 sentences
2. 3-5 key points
3. 2-3 related concepts, listed as plain text
4. 1-2 open questions for future research"#
    )
}

/// Concept discovery prompt for a note's content
pub fn concept_prompt(topic: &str, content: &str) -> String {
    format!(
        r#"Identify the key concepts in this research note that should become wiki links.

Research Topic: {topic}

Content:
{content}

Rules:
1. Pick concepts, terms, people, places, theories or events significant enough for their own note
2. Exclude the main topic itself
3. Exclude common or generic words such as "research", "study", "analysis", "method", "process", "system"
4. Spell and capitalize each concept exactly as it appears in the text
5. Return ONLY the concept names, one per line, with no numbering, bullets or commentary"#
    )
}

/// Existing-link discovery prompt
pub fn existing_link_prompt<'a>(
    content: &str,
    known: impl IntoIterator<Item = &'a String>,
) -> String {
    let excerpt: String = content.chars().take(EXISTING_LINK_CONTEXT_CHARS).collect();
    let titles = known
        .into_iter()
        .map(|t| format!("- {t}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Given this research content:

{excerpt}...

And these existing note titles:
{titles}

Which existing notes, if any, should be linked from this content?
Return only the directly relevant titles, exactly as listed, separated by commas.
If none are relevant, return "{NO_MATCHES}"."#
    )
}
