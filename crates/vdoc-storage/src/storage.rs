//! Storage trait and error types.
//!
//! Every path handed to a [`Storage`] is relative to its root:
//! - `"5.4/documentation.md"` is the index page of version 5.4
//! - `"master/installation.md"` is a named page
//!
//! Implementations decide how a relative path maps onto their backing store.

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a document could not be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// The document does not exist.
    NotFound,
    PermissionDenied,
    /// The path escapes the storage root.
    InvalidPath,
    /// The document is not valid UTF-8.
    InvalidContent,
    Other,
}

impl StorageErrorKind {
    fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::PermissionDenied => "Permission denied",
            Self::InvalidPath => "Invalid path",
            Self::InvalidContent => "Invalid content",
            Self::Other => "Error",
        }
    }
}

impl From<std::io::ErrorKind> for StorageErrorKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            std::io::ErrorKind::InvalidData => Self::InvalidContent,
            _ => Self::Other,
        }
    }
}

/// Failure to read a document, tagged with the backend and path involved.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Name the backend that failed (`"Fs"`, `"Mock"`).
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path of the document involved, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Whether the document simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    #[must_use]
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::InvalidPath).with_path(path)
    }

    /// Classify an I/O error, keeping it as the source.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let error = Self::new(err.kind().into()).with_source(err);
        match path {
            Some(path) => error.with_path(path),
            None => error,
        }
    }
}

impl fmt::Display for StorageError {
    /// `[Backend] Kind: source (path: 5.4/page.md)`, omitting absent parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        f.write_str(self.kind.describe())?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// Read access to a documentation tree.
///
/// Implementations are pure I/O wrappers: they locate and return raw
/// Markdown text and never transform it.
pub trait Storage: Send + Sync {
    /// Read the full text of the document at `path` (e.g. `5.4/installation.md`).
    ///
    /// # Errors
    ///
    /// Fails with [`StorageErrorKind::NotFound`] when the document does not
    /// exist, or another kind when it exists but cannot be read.
    fn read(&self, path: &Path) -> Result<String, StorageError>;

    /// Whether a document exists at `path`.
    ///
    /// Errors count as "does not exist".
    fn exists(&self, path: &Path) -> bool;
}
