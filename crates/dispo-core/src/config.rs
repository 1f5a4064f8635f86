//! Resolver configuration
//!
//! Describes how a [`DomainResolver`](crate::DomainResolver) is built: where
//! the built-in lists live and which custom domains or files to start with.
//!
//! ```toml
//! list_path = "/usr/share/dispo"
//! blocked = ["spam-relay.net"]
//! allowed = ["partner.example"]
//! custom_blocked_file = "blocked.json"
//! preload = true
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the built-in list files (default: bundled lists)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_path: Option<PathBuf>,

    /// Domains to block in addition to the built-in list
    pub blocked: Vec<String>,

    /// Domains to always allow
    pub allowed: Vec<String>,

    /// JSON file backing the custom blocked list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_blocked_file: Option<PathBuf>,

    /// JSON file backing the custom allowed list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_allowed_file: Option<PathBuf>,

    /// Load the built-in lists at construction instead of on first query
    pub preload: bool,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref list_path) = self.list_path {
            if list_path.exists() && !list_path.is_dir() {
                return Err(Error::config_value(
                    "list_path",
                    format!("{} is not a directory", list_path.display()),
                ));
            }
        }

        let files = [
            ("custom_blocked_file", &self.custom_blocked_file),
            ("custom_allowed_file", &self.custom_allowed_file),
        ];
        for (key, file) in files {
            if matches!(file, Some(path) if path.as_os_str().is_empty()) {
                return Err(Error::config_value(key, "Path must not be empty"));
            }
        }

        Ok(())
    }
}
