//! Config command - configuration management

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dispo_core::{Config, DomainResolver};
use std::path::PathBuf;
use tracing::info;

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Generate a configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "dispo.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Config file to validate
        file: PathBuf,
    },

    /// Show default file locations
    Paths,
}

/// Execute config command
pub fn execute(args: ConfigArgs, config: &Config) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config),
        ConfigAction::Generate { output } => generate_config(output, config),
        ConfigAction::Validate { file } => validate_config(file),
        ConfigAction::Paths => show_paths(),
    }
}

fn show_config(config: &Config) -> Result<()> {
    let toml_str = config.to_toml().context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

fn generate_config(output: PathBuf, config: &Config) -> Result<()> {
    let toml_str = config.to_toml().context("Failed to serialize config")?;

    let content = format!(
        "# dispo configuration\n\
         # list_path: directory with {} and {}\n\
         # blocked/allowed: inline custom domains\n\
         # custom_blocked_file/custom_allowed_file: JSON custom lists\n\n\
         {}",
        dispo_core::store::DISPOSABLE_LIST,
        dispo_core::store::ALLOW_LIST,
        toml_str
    );

    std::fs::write(&output, content)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    info!("Generated config file: {:?}", output);
    println!("Configuration file generated: {}", output.display());

    Ok(())
}

fn validate_config(file: PathBuf) -> Result<()> {
    let config = Config::load(&file)
        .with_context(|| format!("Failed to load config from {:?}", file))?;

    config.validate().context("Configuration validation failed")?;

    let resolver = DomainResolver::from_config(&config);

    println!("✓ Configuration is valid");
    println!(
        "  List path: {}",
        config
            .list_path
            .as_ref()
            .map_or_else(|| "(bundled)".to_string(), |p| p.display().to_string())
    );
    println!("  Disposable domains: {}", resolver.count());
    println!("  Custom blocked: {}", resolver.custom_blocked_count());
    println!("  Custom allowed: {}", resolver.custom_allowed_count());

    Ok(())
}

fn show_paths() -> Result<()> {
    println!("Built-in lists:");
    println!("  compiled in (override with --list-path or list_path)");
    println!(
        "  files: {}, {}",
        dispo_core::store::DISPOSABLE_LIST,
        dispo_core::store::ALLOW_LIST
    );
    println!();

    println!("Default custom list files:");
    if let Some(dirs) = directories::ProjectDirs::from("", "", "dispo") {
        println!("  {}/blocked.json", dirs.data_dir().display());
        println!("  {}/allowed.json", dirs.data_dir().display());
    } else {
        println!("  ./blocked.json");
        println!("  ./allowed.json");
    }

    Ok(())
}
