//! tack CLI entry point: argument parsing, logging setup and command dispatch.

use clap::Parser;
use miette::Result;
use tack_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.no_color, args.quiet);

    let global = args.global();
    let result = match args.command {
        cli::Command::Run(run_args) => commands::run_execute(run_args, &global).await,
        cli::Command::List => commands::list_execute(),
    };

    result.map_err(error::cli_error_to_miette)
}
