//! dispo CLI
//!
//! Command-line interface for disposable email domain checks.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use args::Args;
use commands::Command;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(&args)?;

    let result = run(args);

    if let Err(ref e) = result {
        error!("Fatal error: {:#}", e);
    }

    result
}

fn run(args: Args) -> Result<()> {
    let config = commands::effective_config(&args)?;

    match args.command {
        Command::Check(check_args) => commands::check::execute(check_args, &config),
        Command::Count => commands::count::execute(&config),
        Command::Blocked(list_args) => {
            commands::lists::execute(list_args, commands::lists::ListKind::Blocked, &config)
        }
        Command::Allowed(list_args) => {
            commands::lists::execute(list_args, commands::lists::ListKind::Allowed, &config)
        }
        Command::Config(config_args) => commands::config::execute(config_args, &config),
        Command::Completions { shell } => commands::completions(shell),
    }
}
