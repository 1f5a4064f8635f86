//! Custom list management commands
//!
//! Edits the JSON files behind the custom blocked and allowed lists.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dispo_core::{normalize, Config, DomainResolver};
use std::path::{Path, PathBuf};

/// Which custom list a command operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Custom blocked list
    Blocked,
    /// Custom allowed list
    Allowed,
}

impl ListKind {
    fn name(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Allowed => "allowed",
        }
    }

    /// File used when neither `--file` nor the config names one
    fn default_path(self) -> PathBuf {
        let file_name = format!("{}.json", self.name());
        match directories::ProjectDirs::from("", "", "dispo") {
            Some(dirs) => dirs.data_dir().join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    fn configured_path(self, config: &Config) -> Option<PathBuf> {
        match self {
            Self::Blocked => config.custom_blocked_file.clone(),
            Self::Allowed => config.custom_allowed_file.clone(),
        }
    }
}

/// List management arguments
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: ListCommands,

    /// Custom list file (JSON)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,
}

/// List subcommands
#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Show all domains in the list
    List,

    /// Add domains to the list
    Add {
        /// Domains or addresses to add
        #[arg(required = true)]
        domains: Vec<String>,
    },

    /// Remove domains from the list
    Remove {
        /// Domains or addresses to remove
        #[arg(required = true)]
        domains: Vec<String>,
    },

    /// Remove every domain from the list
    Clear,
}

/// Execute list command
pub fn execute(args: ListArgs, kind: ListKind, config: &Config) -> Result<()> {
    let path = args
        .file
        .or_else(|| kind.configured_path(config))
        .unwrap_or_else(|| kind.default_path());

    let resolver = DomainResolver::with_lists(
        Vec::<String>::new(),
        Vec::<String>::new(),
        config.list_path.clone(),
    );
    load(&resolver, kind, &path);

    match args.command {
        ListCommands::List => list_domains(&resolver, kind, &path),
        ListCommands::Add { domains } => add_domains(&resolver, kind, &path, &domains),
        ListCommands::Remove { domains } => remove_domains(&resolver, kind, &path, &domains),
        ListCommands::Clear => clear_domains(&resolver, kind, &path),
    }
}

fn load(resolver: &DomainResolver, kind: ListKind, path: &Path) -> usize {
    match kind {
        ListKind::Blocked => resolver.load_custom_blocked(path),
        ListKind::Allowed => resolver.load_custom_allowed(path),
    }
}

fn domains(resolver: &DomainResolver, kind: ListKind) -> Vec<String> {
    match kind {
        ListKind::Blocked => resolver.custom_blocked(),
        ListKind::Allowed => resolver.custom_allowed(),
    }
}

fn list_domains(resolver: &DomainResolver, kind: ListKind, path: &Path) -> Result<()> {
    let domains = domains(resolver, kind);

    println!("{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        format!(" Custom {} list", kind.name()).bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("File: {}", path.display().to_string().cyan());
    println!("Total domains: {}", domains.len().to_string().green());
    println!("{}", "─".repeat(50).bright_black());

    if domains.is_empty() {
        println!("{}", "  (empty)".dimmed());
    } else {
        for domain in &domains {
            println!("  {} {}", "●".green(), domain);
        }
    }

    println!("{}", "═".repeat(50).bright_blue());

    Ok(())
}

fn add_domains(
    resolver: &DomainResolver,
    kind: ListKind,
    path: &Path,
    inputs: &[String],
) -> Result<()> {
    for input in inputs {
        let domain = normalize(input);
        if domain.is_empty() {
            println!("{} Skipped {:?}: no domain", "!".yellow(), input);
            continue;
        }

        let saved = match kind {
            ListKind::Blocked => resolver.add_blocked(&domain, true),
            ListKind::Allowed => resolver.add_allowed(&domain, true),
        };
        if !saved {
            bail!("Failed to write {}", path.display());
        }

        println!("{} Added {} to {} list", "✓".green(), domain.cyan(), kind.name());
    }

    println!("  File: {}", path.display());
    Ok(())
}

fn remove_domains(
    resolver: &DomainResolver,
    kind: ListKind,
    path: &Path,
    inputs: &[String],
) -> Result<()> {
    let existing = domains(resolver, kind);

    for input in inputs {
        let domain = normalize(input);
        if !existing.contains(&domain) {
            println!("{} {} is not in the {} list", "!".yellow(), input, kind.name());
            continue;
        }

        let saved = match kind {
            ListKind::Blocked => resolver.remove_blocked(&domain, true),
            ListKind::Allowed => resolver.remove_allowed(&domain, true),
        };
        if !saved {
            bail!("Failed to write {}", path.display());
        }

        println!("{} Removed {} from {} list", "✓".green(), domain.cyan(), kind.name());
    }

    Ok(())
}

fn clear_domains(resolver: &DomainResolver, kind: ListKind, path: &Path) -> Result<()> {
    let removed = domains(resolver, kind);
    for domain in &removed {
        match kind {
            ListKind::Blocked => resolver.unblock(domain),
            ListKind::Allowed => resolver.disallow(domain),
        }
    }

    let saved = match kind {
        ListKind::Blocked => resolver.save_custom_blocked(None),
        ListKind::Allowed => resolver.save_custom_allowed(None),
    };
    if !saved {
        bail!("Failed to write {}", path.display());
    }

    println!(
        "{} Cleared {} domains from {} list",
        "✓".green(),
        removed.len(),
        kind.name()
    );
    Ok(())
}
