use clap::{Args, Subcommand};

/// Available tack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run tasks, prerequisites first
    ///
    /// Each task runs at most once. With no task named, `bundle` runs.
    ///
    /// Examples:
    ///   tack run
    ///   tack run watch
    Run(RunArgs),

    /// List the available tasks and their prerequisites
    List,
}

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Tasks to run (`bundle`, `watch`)
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,
}
