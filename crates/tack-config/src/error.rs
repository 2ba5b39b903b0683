//! Error types for configuration validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors
    #[error("entry path not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    #[error("entry path is not a file: {}", .0.display())]
    EntryNotAFile(PathBuf),

    #[error("base source directory not found: {}", .0.display())]
    BaseDirNotFound(PathBuf),

    #[error("output path exists but is not a directory: {}", .0.display())]
    OutputNotADirectory(PathBuf),

    #[error("output directory is not writable: {}", .0.display())]
    OutputNotWritable(PathBuf),

    // Config parsing/loading errors
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid config value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to load configuration: {0}")]
    Load(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(err.to_string())
    }
}
