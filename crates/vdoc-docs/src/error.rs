use vdoc_storage::StorageError;

/// Error returned when a documentation page cannot be produced.
///
/// A missing page is not an error; it is reported as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// Storage failed for a reason other than the page being absent.
    #[error("{0}")]
    Storage(#[from] StorageError),
}
