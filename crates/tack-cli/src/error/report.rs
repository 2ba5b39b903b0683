//! Conversion of CLI errors into miette reports for the final error output.

use miette::Report;

use super::CliError;
use crate::tasks::TaskName;

/// Convert a [`CliError`] into a miette [`Report`].
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundle(e) => Report::new(e),
        CliError::Config(e) => miette::miette!(
            help = "Check tack.toml, or pass --config <FILE>",
            "Configuration error: {}",
            e
        ),
        CliError::UnknownTask(name) => miette::miette!(
            help = format!("Available tasks: {}", TaskName::names().join(", ")),
            "Unknown task '{}'",
            name
        ),
        CliError::Pattern(e) => miette::miette!(
            help = "Watch patterns use glob syntax, e.g. \"src/**/*.js\"",
            "Invalid watch pattern: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}
