//! Check command - classify addresses and domains

use anyhow::{Context, Result};
use clap::Args;
use colored::{ColoredString, Colorize};
use dispo_core::{normalize, Config, DomainResolver};
use serde::Serialize;
use std::path::PathBuf;

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Email addresses or domains to check
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Custom blocked list (JSON) to apply
    #[arg(long, value_name = "FILE")]
    pub blocked_file: Option<PathBuf>,

    /// Custom allowed list (JSON) to apply
    #[arg(long, value_name = "FILE")]
    pub allowed_file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Verdict for a single input
#[derive(Debug, Serialize)]
struct Verdict {
    input: String,
    domain: Option<String>,
    disposable: bool,
    blocked: bool,
    allowed: bool,
}

/// Execute check command
pub fn execute(args: CheckArgs, config: &Config) -> Result<()> {
    let resolver = DomainResolver::from_config(config);

    if let Some(ref path) = args.blocked_file {
        resolver.load_custom_blocked(path);
    }
    if let Some(ref path) = args.allowed_file {
        resolver.load_custom_allowed(path);
    }

    let verdicts: Vec<Verdict> = args
        .inputs
        .iter()
        .map(|input| classify(&resolver, input))
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&verdicts).context("Failed to serialize results")?;
        println!("{}", json);
        return Ok(());
    }

    for verdict in &verdicts {
        let domain = verdict.domain.as_deref().unwrap_or("(no domain)");
        println!(
            "{}  {}  disposable: {}  blocked: {}  allowed: {}",
            verdict.input,
            domain.cyan(),
            flag(verdict.disposable, true),
            flag(verdict.blocked, true),
            flag(verdict.allowed, false),
        );
    }

    Ok(())
}

fn classify(resolver: &DomainResolver, input: &str) -> Verdict {
    let domain = normalize(input);
    Verdict {
        input: input.to_string(),
        domain: (!domain.is_empty()).then_some(domain),
        disposable: resolver.is_disposable(input),
        blocked: resolver.is_blocked(input),
        allowed: resolver.is_allowed(input),
    }
}

fn flag(value: bool, bad: bool) -> ColoredString {
    match (value, bad) {
        (true, true) => "yes".red(),
        (true, false) => "yes".green(),
        (false, _) => "no".dimmed(),
    }
}
