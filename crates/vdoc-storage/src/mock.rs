//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores document contents in memory and counts successful reads, so tests
/// can assert how often a consumer actually hit storage.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use vdoc_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("5.4/installation.md", "# Installation");
///
/// let content = storage.read(Path::new("5.4/installation.md")).unwrap();
/// assert_eq!(storage.read_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    contents: RwLock<HashMap<PathBuf, String>>,
    reads: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a document after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.contents
            .write()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Remove a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove(&self, path: impl AsRef<Path>) {
        self.contents.write().unwrap().remove(path.as_ref());
    }

    /// Number of successful [`Storage::read`] calls so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let content = self
            .contents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.contents.read().unwrap().contains_key(path)
    }
}
