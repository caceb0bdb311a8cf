//! Filesystem storage implementation.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a documentation directory.
///
/// Relative paths are joined onto the root, so `5.4/installation.md` resolves
/// to `{root}/5.4/installation.md`.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use vdoc_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("resources/docs"));
/// if storage.exists(Path::new("master/installation.md")) {
///     let markdown = storage.read(Path::new("master/installation.md"))?;
/// }
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root directory for document storage.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path stays inside the root directory.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`), e.g. a page identifier of `../../etc/passwd`.
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes_root = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes_root {
            return Err(StorageError::invalid_path(path).with_backend(BACKEND));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.root.join(path);
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        if let Err(e) = Self::validate_path(path) {
            tracing::debug!(error = %e, "Rejected document path");
            return false;
        }
        self.root.join(path).is_file()
    }
}
