use std::path::PathBuf;

/// Failure to load or validate `vdoc.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is not acceptable.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// `${VAR}` referenced an unset variable.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
