//! tack CLI - bundle and watch tasks for JavaScript projects.
//!
//! `tack run` plans the requested tasks, expanding prerequisites, and runs
//! each one once in dependency order:
//!
//! - `bundle` runs the [`tack_bundler`] pipeline once for the configured entry.
//! - `watch` depends on `bundle`, then re-runs it whenever a file matching the
//!   watch patterns changes, until interrupted.
//!
//! # Modules
//!
//! - [`cli`] - clap argument definitions
//! - [`tasks`] - the task set, the planner, and the task runner
//! - [`watch`] - glob filtering, the notify-backed watcher and the rebuild loop
//! - [`error`] - error types with actionable messages
//! - [`logger`] / [`ui`] - tracing setup and terminal status lines

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod tasks;
pub mod ui;
pub mod watch;

pub use error::{CliError, Result, ResultExt};
