//! Count command - size of the built-in disposable list

use anyhow::Result;
use dispo_core::{Config, DomainResolver};

/// Execute count command
pub fn execute(config: &Config) -> Result<()> {
    let resolver = DomainResolver::from_config(config);
    println!("{}", resolver.count());
    Ok(())
}
