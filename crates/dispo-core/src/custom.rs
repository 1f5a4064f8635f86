//! Caller-managed domain lists
//!
//! A [`CustomList`] holds blocked or allowed overrides. It can be bound to a
//! JSON file: loading merges the file into the list and binds it, saving
//! without an explicit destination writes back to the bound file.
//!
//! File format is a pretty-printed JSON array of domains, sorted ascending.
//! A missing or malformed file loads as an empty list.

use crate::domain::normalize;
use crate::error::{Error, Result};
use dashmap::DashSet;
use parking_lot::RwLock;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// A mutable set of normalized domains with an optional file binding
#[derive(Debug, Default)]
pub struct CustomList {
    /// Normalized domains
    domains: DashSet<String>,
    /// File this list was loaded from
    binding: RwLock<Option<PathBuf>>,
}

impl CustomList {
    /// Create an empty, unbound list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unbound list seeded with domains
    pub fn with_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = Self::new();
        list.extend(domains);
        list
    }

    /// Add a domain; returns false when it normalizes to nothing
    pub fn insert(&self, domain: &str) -> bool {
        let domain = normalize(domain);
        if domain.is_empty() {
            return false;
        }
        self.domains.insert(domain);
        true
    }

    /// Add several domains, skipping any that normalize to nothing
    pub fn extend<I, S>(&self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for domain in domains {
            self.insert(domain.as_ref());
        }
    }

    /// Remove a domain if present
    pub fn remove(&self, domain: &str) -> bool {
        self.domains.remove(&normalize(domain)).is_some()
    }

    /// Exact membership test on an already normalized domain
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Remove all domains; the binding is kept
    pub fn clear(&self) {
        self.domains.clear();
    }

    /// Number of domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// All domains, sorted
    pub fn domains(&self) -> Vec<String> {
        let mut result: Vec<String> = self.domains.iter().map(|d| d.clone()).collect();
        result.sort();
        result
    }

    /// File this list is bound to
    pub fn binding(&self) -> Option<PathBuf> {
        self.binding.read().clone()
    }

    /// Merge the domains in a JSON file into the list and bind to it
    ///
    /// Domains already in the list are kept. Returns the number of domains
    /// now in the list.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> usize {
        let path = path.as_ref();
        *self.binding.write() = Some(path.to_path_buf());

        let entries = match read_entries(path) {
            Ok(entries) => entries,
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("Custom list not found, starting empty: {}", path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Ignoring unreadable custom list {}: {}", path.display(), e);
                Vec::new()
            }
        };

        self.extend(entries);

        info!("Loaded {} custom domains from {}", self.len(), path.display());
        self.len()
    }

    /// Write the list to `path`, or to the bound file when `path` is `None`
    ///
    /// Returns false when there is no destination or the write fails.
    pub fn save_file(&self, path: Option<&Path>) -> bool {
        let Some(path) = path.map(Path::to_path_buf).or_else(|| self.binding()) else {
            warn!("Custom list has no bound file and no destination was given");
            return false;
        };

        match write_entries(&path, &self.domains()) {
            Ok(()) => {
                info!("Saved {} custom domains to {}", self.len(), path.display());
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}

/// Read string entries from a JSON array, skipping non-string elements
fn read_entries(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&content)?;

    Ok(values
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Write entries as pretty JSON through a temporary file renamed into place
fn write_entries(path: &Path, domains: &[String]) -> Result<()> {
    let persist_err = |message: String| Error::persist(path.display().to_string(), message);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| persist_err(e.to_string()))?;

    let json = serde_json::to_string_pretty(domains)?;

    let mut file = NamedTempFile::new_in(&dir).map_err(|e| persist_err(e.to_string()))?;
    writeln!(file, "{json}").map_err(|e| persist_err(e.to_string()))?;
    file.as_file()
        .sync_all()
        .map_err(|e| persist_err(e.to_string()))?;
    file.persist(path)
        .map_err(|e| persist_err(e.error.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_normalizes() {
        let list = CustomList::new();
        assert!(list.insert("User@Bad.COM"));
        assert!(list.insert("@other.org"));
        assert!(!list.insert("user@"));
        assert!(!list.insert("   "));

        assert_eq!(list.domains(), vec!["bad.com", "other.org"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let list = CustomList::with_domains(["a.com", "b.com"]);
        assert!(list.remove("A.COM"));
        assert!(!list.remove("missing.com"));
        assert_eq!(list.len(), 1);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocked.json");

        let list = CustomList::with_domains(["zeta.com", "alpha.com", "mid.org"]);
        assert!(list.save_file(Some(&path)));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "[\n  \"alpha.com\",\n  \"mid.org\",\n  \"zeta.com\"\n]\n"
        );

        let loaded = CustomList::new();
        assert_eq!(loaded.load_file(&path), 3);
        assert_eq!(loaded.domains(), list.domains());
        assert_eq!(loaded.binding(), Some(path));
    }

    #[test]
    fn test_load_merges_into_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allowed.json");
        std::fs::write(&path, r#"["New.com", "", 42, "user@other.com", "old.com"]"#).unwrap();

        let list = CustomList::with_domains(["old.com", "seeded.org"]);
        assert_eq!(list.load_file(&path), 4);
        assert_eq!(
            list.domains(),
            vec!["new.com", "old.com", "other.com", "seeded.org"]
        );
    }

    #[test]
    fn test_reload_rebinds_and_keeps_domains() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        std::fs::write(&first, r#"["a.com"]"#).unwrap();
        std::fs::write(&second, r#"["b.com"]"#).unwrap();

        let list = CustomList::new();
        list.load_file(&first);
        assert_eq!(list.load_file(&second), 2);
        assert_eq!(list.binding(), Some(second));
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        let list = CustomList::new();
        assert_eq!(list.load_file(&missing), 0);
        assert_eq!(list.binding(), Some(missing));

        let malformed = dir.path().join("malformed.json");
        std::fs::write(&malformed, "{ not json").unwrap();
        list.insert("a.com");
        assert_eq!(list.load_file(&malformed), 1);
        assert_eq!(list.domains(), vec!["a.com"]);
        assert_eq!(list.binding(), Some(malformed));
    }

    #[test]
    fn test_save_without_destination() {
        let list = CustomList::with_domains(["a.com"]);
        assert!(!list.save_file(None));
    }

    #[test]
    fn test_save_uses_binding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocked.json");

        let list = CustomList::new();
        list.load_file(&path);
        list.insert("bound.com");
        assert!(list.save_file(None));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("bound.com"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/lists/blocked.json");

        let list = CustomList::with_domains(["a.com"]);
        assert!(list.save_file(Some(&path)));
        assert!(path.exists());
    }

    #[test]
    fn test_save_to_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        // Parent is a regular file, so the directory cannot be created
        let list = CustomList::with_domains(["a.com"]);
        assert!(!list.save_file(Some(&blocker.join("blocked.json"))));
    }
}
