//! Command-line interface definition for tack.
//!
//! # Command Structure
//!
//! - `tack run [TASK...]` - run tasks and their prerequisites (default: `bundle`)
//! - `tack list` - show the available tasks

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{Command, RunArgs};

/// tack - bundle and watch tasks for JavaScript projects
#[derive(Parser, Debug)]
#[command(
    name = "tack",
    version,
    about = "Bundle and watch tasks for JavaScript projects",
    long_about = "tack bundles one JavaScript entry file with Rolldown into a single output\n\
                  file plus source map, and can keep the bundle up to date while you edit."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to the current directory)
    ///
    /// Paths in the configuration and watch patterns are relative to it.
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Configuration file (defaults to `tack.toml` in the project root)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub cwd: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            cwd: self.cwd.clone(),
            config: self.config.clone(),
        }
    }
}
