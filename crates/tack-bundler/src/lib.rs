//! # tack-bundler
//!
//! The bundle pipeline behind `tack run bundle`: one entry file is transpiled,
//! its dependency graph resolved, CommonJS modules normalized, and the result
//! written as a single bundle plus source map.
//!
//! Rolldown does the heavy lifting. This crate only decides what to ask of it,
//! in a fixed sequence of stages with an explicit artifact between each:
//!
//! ```text
//! BuildConfig ──plan──▶ BundlePlan ──generate──▶ BundleArtifact ──write──▶ WrittenBundle
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use tack_config::BuildConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::default(); // ./src/main.js → ./dist, iife, source map
//! let written = tack_bundler::bundle(&config, Path::new(".")).await?;
//! for file in &written.files {
//!     println!("{} ({} bytes)", file.path.display(), file.size);
//! }
//! # Ok(()) }
//! ```

pub mod diagnostics;
pub mod output;
pub mod pipeline;

pub use output::{BundleArtifact, EmittedFile, EmittedKind, WrittenBundle, WrittenFile};
pub use pipeline::{BundlePlan, TransformStep, bundle, generate};

use std::path::PathBuf;

/// Error types for tack-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from Rolldown bundler.
    #[error("Rolldown bundler error: {}", format_bundler_error(.0))]
    Bundler(Vec<diagnostics::ExtractedDiagnostic>),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Entry file does not exist.
    #[error("Entry not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),
}

/// Result type alias for tack-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown error.
    ///
    /// Extracts structured diagnostics from Rolldown's error types.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_error(error))
    }

    /// Whether a watch loop may keep going after this error.
    ///
    /// Source problems (syntax, resolution, transform) are fixed by editing
    /// files, so the next change gets another run. An entry that is missing
    /// counts too: editors and `git checkout` replace files by removing them
    /// first. Configuration and output directory failures are not recoverable.
    ///
    /// A missing entry before the first run is caught by config validation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Bundler(_) | Error::EntryNotFound(_))
    }

    /// Diagnostics carried by a bundler error, empty for other variants.
    pub fn diagnostics(&self) -> &[diagnostics::ExtractedDiagnostic] {
        match self {
            Error::Bundler(diagnostics) => diagnostics,
            _ => &[],
        }
    }
}

/// Format bundler error diagnostics for display.
fn format_bundler_error(diagnostics: &[diagnostics::ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [diag] => diag.to_string(),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Error::Io(_) => "IO_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::EntryNotFound(path) => Some(Box::new(format!(
                "Check `entry` and `base_path` in tack.toml; looked for {}",
                path.display()
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Emitted files must stay inside `dist_path`.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            Error::Bundler(diagnostics) => match diagnostics.as_slice() {
                [diag] => diag
                    .help
                    .as_ref()
                    .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
                [] => None,
                _ => Some(Box::new(
                    "Multiple bundler errors occurred. See details above.".to_string(),
                )),
            },
            _ => None,
        }
    }
}
