//! Research note rendering

use crate::wikilinks::wikilink;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Heading the existing-notes block is inserted ahead of
pub const RELATED_NOTES_HEADING: &str = "## Related Notes";

/// Heading of the existing-notes block
pub const EXISTING_NOTES_HEADING: &str = "### Existing Notes";

/// Fixed `note_type` for generated notes
pub const NOTE_TYPE: &str = "research";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// YAML frontmatter of a research note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Original topic, before normalization
    pub title: String,
    /// Always empty on creation
    pub aliases: Vec<String>,
    /// `research` plus the topic as a tag
    pub tags: Vec<String>,
    /// Creation time
    pub created: String,
    /// Last modification time (equals `created` for new notes)
    pub modified: String,
    /// Always [`NOTE_TYPE`]
    pub note_type: String,
}

impl Frontmatter {
    /// Frontmatter for a note about `topic` created at `now`
    pub fn new(topic: &str, now: DateTime<Local>) -> Self {
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        Self {
            title: topic.to_string(),
            aliases: Vec::new(),
            tags: vec![NOTE_TYPE.to_string(), topic_tag(topic)],
            created: timestamp.clone(),
            modified: timestamp,
            note_type: NOTE_TYPE.to_string(),
        }
    }
}

/// Tag form of a topic: lower-cased, spaces replaced by underscores
pub fn topic_tag(topic: &str) -> String {
    topic.to_lowercase().replace(' ', "_")
}

/// A note ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchNote {
    /// Frontmatter block
    pub frontmatter: Frontmatter,
    /// Markdown body
    pub body: String,
}

impl ResearchNote {
    /// Assemble a note from linked research content and related notes
    pub fn new(topic: &str, content: &str, existing_links: &[String], now: DateTime<Local>) -> Self {
        Self {
            frontmatter: Frontmatter::new(topic, now),
            body: insert_existing_links(content, existing_links),
        }
    }

    /// Full file contents: `---` frontmatter `---`, a blank line, the body
    pub fn render(&self) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(&self.frontmatter)?;
        Ok(format!("---\n{}---\n\n{}", yaml, self.body))
    }
}

/// Insert an "Existing Notes" block ahead of the related-notes section.
///
/// Without a `## Related Notes` heading the block is appended at the end
/// under a new heading. No links means no change.
pub fn insert_existing_links(content: &str, links: &[String]) -> String {
    if links.is_empty() {
        return content.to_string();
    }

    let mut block = format!("\n{EXISTING_NOTES_HEADING}\n");
    for link in links {
        block.push_str("- ");
        block.push_str(&wikilink(link));
        block.push('\n');
    }

    match content.find(RELATED_NOTES_HEADING) {
        Some(idx) => {
            let mut out = String::with_capacity(content.len() + block.len() + 1);
            out.push_str(&content[..idx]);
            out.push_str(&block);
            out.push('\n');
            out.push_str(&content[idx..]);
            out
        }
        None => {
            let mut out = content.trim_end().to_string();
            out.push_str("\n\n");
            out.push_str(RELATED_NOTES_HEADING);
            out.push('\n');
            out.push_str(&block);
            out
        }
    }
}
