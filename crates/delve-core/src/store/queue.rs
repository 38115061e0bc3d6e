//! Work queue file

use super::{io_error, write_atomic, StoreError, StoreResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Plain-text queue: one identifier per line, no blank lines.
///
/// Behaves as an ordered set. Every mutation is a read-modify-write of the
/// whole file.
#[derive(Debug, Clone)]
pub struct QueueFile {
    path: PathBuf,
}

impl QueueFile {
    /// Queue backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Queue file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries in order. A missing file reads as empty.
    pub fn read(&self) -> StoreResult<Vec<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(io_error(&self.path)(e)),
        }
    }

    /// Replace the queue contents
    pub fn write(&self, entries: &[String]) -> StoreResult<()> {
        let mut content = String::new();
        for entry in entries {
            if entry.contains(['\n', '\r']) {
                return Err(StoreError::MultilineIdentifier(entry.clone()));
            }
            content.push_str(entry);
            content.push('\n');
        }
        write_atomic(&self.path, &content)
    }

    /// Append `identifier` unless it is already queued. Returns whether the
    /// queue changed.
    pub fn enqueue(&self, identifier: &str) -> StoreResult<bool> {
        Ok(self.enqueue_all([identifier])? == 1)
    }

    /// Append each identifier not already queued, preserving order. Returns
    /// how many were added. The file is written once.
    pub fn enqueue_all<I, S>(&self, identifiers: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = self.read()?;
        let mut added = 0;
        for identifier in identifiers {
            let identifier = identifier.as_ref();
            if identifier.is_empty() || entries.iter().any(|e| e == identifier) {
                continue;
            }
            entries.push(identifier.to_string());
            added += 1;
            debug!("Queued {:?}", identifier);
        }
        if added > 0 {
            self.write(&entries)?;
        }
        debug!("Added {} entries, queue size {}", added, entries.len());
        Ok(added)
    }

    /// Remove the first occurrence of `identifier`. Returns whether it was
    /// present.
    pub fn remove(&self, identifier: &str) -> StoreResult<bool> {
        let mut entries = self.read()?;
        match entries.iter().position(|e| e == identifier) {
            Some(idx) => {
                entries.remove(idx);
                self.write(&entries)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// First entry, if any
    pub fn peek(&self) -> StoreResult<Option<String>> {
        Ok(self.read()?.into_iter().next())
    }

    /// Empty the queue, leaving a zero-length file
    pub fn clear(&self) -> StoreResult<()> {
        self.write(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn queue_in(dir: &TempDir) -> QueueFile {
        QueueFile::new(dir.path().join("queue.txt"))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(queue_in(&dir).read().unwrap().is_empty());
    }

    #[test]
    fn test_read_skips_blank_lines_and_trims() {
        let dir = TempDir::new().unwrap();
        let queue = queue_in(&dir);
        std::fs::write(queue.path(), "Alpha\n\n  Beta  \r\n\nGamma").unwrap();
        assert_eq!(queue.read().unwrap(), vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_enqueue_existing_is_noop() {
        let dir = TempDir::new().unwrap();
        let queue = queue_in(&dir);

        assert!(queue.enqueue("Chlorophyll").unwrap());
        assert!(queue.enqueue("Stomata").unwrap());
        assert!(!queue.enqueue("Chlorophyll").unwrap());

        assert_eq!(queue.read().unwrap(), vec!["Chlorophyll", "Stomata"]);
    }

    #[test]
    fn test_enqueue_all_dedups_within_batch() {
        let dir = TempDir::new().unwrap();
        let queue = queue_in(&dir);
        queue.enqueue("B").unwrap();

        let added = queue.enqueue_all(["A", "B", "A", "", "C"]).unwrap();
        assert_eq!(added, 2);
        assert_eq!(queue.read().unwrap(), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_remove_first_occurrence() {
        let dir = TempDir::new().unwrap();
        let queue = queue_in(&dir);
        queue.write(&["A".into(), "B".into(), "C".into()]).unwrap();

        assert!(queue.remove("B").unwrap());
        assert!(!queue.remove("Z").unwrap());
        assert_eq!(queue.read().unwrap(), vec!["A", "C"]);
        assert_eq!(queue.peek().unwrap(), Some("A".to_string()));
    }

    #[test]
    fn test_clear_leaves_empty_file() {
        let dir = TempDir::new().unwrap();
        let queue = queue_in(&dir);
        queue.enqueue("A").unwrap();

        queue.clear().unwrap();
        assert!(queue.path().exists());
        assert_eq!(std::fs::read_to_string(queue.path()).unwrap(), "");
        assert!(queue.read().unwrap().is_empty());
        assert_eq!(queue.peek().unwrap(), None);
    }

    #[test]
    fn test_write_rejects_multiline_identifier() {
        let dir = TempDir::new().unwrap();
        let err = queue_in(&dir)
            .write(&["one\ntwo".to_string()])
            .unwrap_err();
        assert!(matches!(err, StoreError::MultilineIdentifier(_)));
    }

    #[test]
    fn test_file_format_is_one_per_line() {
        let dir = TempDir::new().unwrap();
        let queue = queue_in(&dir);
        queue.enqueue_all(["AB Testing", "Relativity"]).unwrap();
        assert_eq!(
            std::fs::read_to_string(queue.path()).unwrap(),
            "AB Testing\nRelativity\n"
        );
    }
}
