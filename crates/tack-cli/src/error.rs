//! Error handling for the tack CLI.
//!
//! [`CliError`] is the one error type commands return. Configuration and
//! bundler errors convert into it automatically, and [`ResultExt`] turns
//! not-found I/O errors into [`CliError::FileNotFound`] for a known path.

mod report;

use std::path::PathBuf;

use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating `tack.toml`
    #[error("Configuration error: {0}")]
    Config(#[from] tack_config::ConfigError),

    /// A bundle run failed
    #[error("Bundle failed: {0}")]
    Bundle(#[from] tack_bundler::Error),

    /// Setting up the filesystem watcher
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// A watch pattern could not be compiled
    #[error("Invalid watch pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// A task name that is not one of the known tasks
    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the watch loop may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CliError::Bundle(e) => e.is_recoverable(),
            _ => false,
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for attaching a path to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    ///
    /// ```rust,no_run
    /// # use std::path::Path;
    /// # use tack_cli::error::{Result, ResultExt};
    /// # fn run() -> Result<()> {
    /// let path = Path::new("tack.toml");
    /// std::fs::read_to_string(path).with_path(path)?;
    /// # Ok(())
    /// # }
    /// ```
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}
