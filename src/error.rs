use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfsyncError {
    #[error("Failed to parse document: {0}")]
    ParseError(#[source] toml::de::Error),

    #[error("Failed to emit document: {0}")]
    EmitError(#[from] toml::ser::Error),

    #[error("Document does not match the config schema: {0}")]
    DecodeError(#[source] toml::de::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("I/O error on {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("No config file path: call .path() or .app_name() on the builder")]
    PathRequired,

    #[error("Could not resolve the {0} config location on this system")]
    UnresolvedLocation(String),
}

impl ConfsyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfsyncError::IoError {
            path: path.into(),
            source,
        }
    }
}
