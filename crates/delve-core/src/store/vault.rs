//! Note storage directory

use super::{io_error, write_atomic, StoreResult};
use crate::identifier::{normalize, note_file_name, NOTE_EXTENSION};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A directory of `<identifier>.md` notes
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    template_name: Option<String>,
}

impl Vault {
    /// Open a vault rooted at `root`. The directory need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            template_name: None,
        }
    }

    /// Exclude the note template (matched by file name) from listings
    pub fn with_template(mut self, file_name: impl Into<String>) -> Self {
        self.template_name = Some(file_name.into());
        self
    }

    /// Vault directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the vault directory if it is missing
    pub fn ensure_exists(&self) -> StoreResult<()> {
        std::fs::create_dir_all(&self.root).map_err(io_error(&self.root))
    }

    /// Identifiers of every note currently on disk.
    ///
    /// Recomputed from a directory listing on each call. A missing directory
    /// is created and reported as empty.
    pub fn known_identifiers(&self) -> StoreResult<BTreeSet<String>> {
        if !self.root.is_dir() {
            self.ensure_exists()?;
            return Ok(BTreeSet::new());
        }

        let mut known = BTreeSet::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_error(&self.root))? {
            let path = entry.map_err(io_error(&self.root))?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION)
            {
                continue;
            }
            let is_template = match (&self.template_name, path.file_name()) {
                (Some(template), Some(name)) => name.to_str() == Some(template.as_str()),
                _ => false,
            };
            if is_template {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                known.insert(stem.to_string());
            }
        }

        debug!("Vault {} holds {} notes", self.root.display(), known.len());
        Ok(known)
    }

    /// Path of the note that `topic` maps to
    pub fn note_path(&self, topic: &str) -> PathBuf {
        self.root.join(note_file_name(topic))
    }

    /// Whether a note for `topic` already exists
    pub fn contains(&self, topic: &str) -> bool {
        self.note_path(topic).is_file()
    }

    /// Write the note for `topic`, replacing any previous file in one step
    pub fn write_note(&self, topic: &str, contents: &str) -> StoreResult<PathBuf> {
        let path = self.note_path(topic);
        write_atomic(&path, contents)?;
        debug!("Wrote note {} ({} bytes)", path.display(), contents.len());
        Ok(path)
    }

    /// Identifier a note for `topic` is stored under
    pub fn identifier_for(&self, topic: &str) -> String {
        normalize(topic)
    }
}
