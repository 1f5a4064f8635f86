//! CLI commands

pub mod check;
pub mod config;
pub mod count;
pub mod lists;

use anyhow::{Context, Result};
use clap::{CommandFactory, Subcommand};
use clap_complete::Shell;
use dispo_core::Config;

use crate::args::Args;

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check addresses or domains
    Check(check::CheckArgs),

    /// Show the size of the built-in disposable list
    Count,

    /// Manage the custom blocked list
    Blocked(lists::ListArgs),

    /// Manage the custom allowed list
    Allowed(lists::ListArgs),

    /// Configuration management
    Config(config::ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Build the effective configuration from the config file and global flags
pub fn effective_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };

    if let Some(ref list_path) = args.list_path {
        config.list_path = Some(list_path.clone());
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// Write completions for `shell` to stdout
pub fn completions(shell: Shell) -> Result<()> {
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
