//! CLI error types.

use vdoc_config::ConfigError;
use vdoc_docs::DocsError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Docs(#[from] DocsError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
