//! Configuration for the `tack` task runner.
//!
//! A project is described by one [`TackConfig`]: the [`BuildConfig`] consumed by
//! the `bundle` task and the [`WatchConfig`] consumed by the `watch` task. The
//! configuration is built once at startup, either from the built-in defaults or
//! from a `tack.toml` file found by [`ConfigDiscovery`], and never mutated.

pub mod build;
pub mod config;
pub mod discovery;
pub mod error;
pub mod validation;
pub mod watch;

// Re-export main types
pub use build::*;
pub use config::*;
pub use error::*;
pub use watch::*;

// Re-export discovery and validation
pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery};
pub use validation::{validate_fs, validate_schema};
