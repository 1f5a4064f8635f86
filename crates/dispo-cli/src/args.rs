//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::commands::Command;

/// dispo - disposable email domain checker
///
/// Checks addresses against a built-in disposable domain list and your own
/// blocked/allowed lists.
#[derive(Parser, Debug)]
#[command(name = "dispo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path
    #[arg(short = 'c', long, global = true, value_name = "FILE", env = "DISPO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the built-in list files
    #[arg(long, global = true, value_name = "DIR", env = "DISPO_LIST_PATH")]
    pub list_path: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format for logs
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Log file path
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<String>,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn test_verbose() {
        let args = Args::parse_from(["dispo", "count", "-v"]);
        assert_eq!(args.verbose, 1);

        let args = Args::parse_from(["dispo", "-vvv", "count"]);
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn test_check_inputs() {
        let args = Args::parse_from(["dispo", "check", "a@b.com", "c.org", "--json"]);
        match args.command {
            Command::Check(check) => {
                assert_eq!(check.inputs, vec!["a@b.com", "c.org"]);
                assert!(check.json);
            }
            other => panic!("Wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_completions_shell() {
        let args = Args::parse_from(["dispo", "completions", "zsh"]);
        assert!(matches!(
            args.command,
            Command::Completions {
                shell: clap_complete::Shell::Zsh
            }
        ));

        assert!(Args::try_parse_from(["dispo", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn test_global_list_path() {
        let args = Args::parse_from(["dispo", "count", "--list-path", "/srv/lists"]);
        assert_eq!(args.list_path, Some(PathBuf::from("/srv/lists")));
    }
}
