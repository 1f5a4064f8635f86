//! Domain list storage
//!
//! Built-in reference lists are plain text, one domain per line:
//! - Lines starting with # are comments
//! - Empty lines are ignored
//!
//! They are read through a [`ListSource`] and cached in a [`LazyList`] the
//! first time a query needs them. The lists shipped with this crate are
//! compiled in and served by [`EmbeddedSource`].

use once_cell::sync::OnceCell;
use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the built-in disposable domain list
pub const DISPOSABLE_LIST: &str = "disposable_email_blocklist.conf";

/// File name of the built-in allow list that suppresses false positives
pub const ALLOW_LIST: &str = "allowlist.conf";

const BUNDLED_DISPOSABLE: &str = include_str!("../data/disposable_email_blocklist.conf");
const BUNDLED_ALLOW: &str = include_str!("../data/allowlist.conf");

/// A set of normalized domains
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet {
    domains: HashSet<String>,
}

impl DomainSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact membership test
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Number of domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Iterate over the domains in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    fn insert(&mut self, domain: String) {
        self.domains.insert(domain);
    }
}

impl<S: AsRef<str>> FromIterator<S> for DomainSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        parse_lines(iter)
    }
}

/// Parse list file content into a set
pub fn parse_list(content: &str) -> DomainSet {
    parse_lines(content.lines())
}

fn parse_lines<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> DomainSet {
    let mut set = DomainSet::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        set.insert(line.to_lowercase());
    }
    set
}

/// Supplier of raw built-in list content
///
/// `None` means the list is absent or unreachable. Callers treat that as an
/// empty list, never as an error.
#[cfg_attr(test, mockall::automock)]
pub trait ListSource: Send + Sync {
    /// Read the list with the given file name
    fn read_list(&self, name: &str) -> Option<String>;
}

/// Reads lists from files under a base directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    base_path: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `base_path`
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Base directory of this source
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ListSource for DirectorySource {
    fn read_list(&self, name: &str) -> Option<String> {
        let path = self.base_path.join(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("List file not found: {}", path.display());
                None
            }
            Err(e) => {
                warn!("Failed to read list file {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Serves the lists compiled into this crate
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl ListSource for EmbeddedSource {
    fn read_list(&self, name: &str) -> Option<String> {
        match name {
            DISPOSABLE_LIST => Some(BUNDLED_DISPOSABLE.to_string()),
            ALLOW_LIST => Some(BUNDLED_ALLOW.to_string()),
            _ => None,
        }
    }
}

/// In-memory lists keyed by file name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lists: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a list
    pub fn with_list(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.lists.insert(name.into(), content.into());
        self
    }
}

impl ListSource for MemorySource {
    fn read_list(&self, name: &str) -> Option<String> {
        self.lists.get(name).cloned()
    }
}

/// A built-in list that is loaded on first use and cached afterwards
#[derive(Debug)]
pub struct LazyList {
    name: &'static str,
    cell: OnceCell<DomainSet>,
}

impl LazyList {
    /// Create an unloaded list for the given file name
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// File name of this list
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the list has been loaded
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Get the list, loading it from `source` the first time
    pub fn get(&self, source: &dyn ListSource) -> &DomainSet {
        self.cell.get_or_init(|| {
            let set = source
                .read_list(self.name)
                .map(|content| parse_list(&content))
                .unwrap_or_default();
            info!("Loaded {} domains from {}", set.len(), self.name);
            set
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_skips_comments_and_blanks() {
        let content = "# Disposable domains\n\nTempMail.com\n  fakeinbox.com  \n   # indented comment\n";
        let set = parse_list(content);

        assert_eq!(set.len(), 2);
        assert!(set.contains("tempmail.com"));
        assert!(set.contains("fakeinbox.com"));
        assert!(!set.contains("TempMail.com"));
    }

    #[test]
    fn test_domain_set_from_iter() {
        let set: DomainSet = ["A.com", " b.com ", "", "#c.com"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("a.com"));
        assert!(set.contains("b.com"));
    }

    #[test]
    fn test_lazy_list_loads_once() {
        let mut source = MockListSource::new();
        source
            .expect_read_list()
            .withf(|name| name == DISPOSABLE_LIST)
            .times(1)
            .returning(|_| Some("tempmail.com\n".to_string()));

        let list = LazyList::new(DISPOSABLE_LIST);
        assert!(!list.is_loaded());

        assert!(list.get(&source).contains("tempmail.com"));
        assert!(list.get(&source).contains("tempmail.com"));
        assert!(list.is_loaded());
    }

    #[test]
    fn test_lazy_list_absent_source_is_empty() {
        let list = LazyList::new(ALLOW_LIST);
        let set = list.get(&MemorySource::new());
        assert!(set.is_empty());
        assert!(list.is_loaded());
    }

    #[test]
    fn test_directory_source_missing_dir() {
        let source = DirectorySource::new("/nonexistent/dispo/lists");
        assert!(source.read_list(DISPOSABLE_LIST).is_none());
    }

    #[test]
    fn test_directory_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ALLOW_LIST), "legitimate.com\n").unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(
            source.read_list(ALLOW_LIST).as_deref(),
            Some("legitimate.com\n")
        );
    }

    #[test]
    fn test_embedded_lists_present() {
        let source = EmbeddedSource;

        let disposable = parse_list(&source.read_list(DISPOSABLE_LIST).unwrap());
        assert!(disposable.contains("mailinator.com"));

        let allowed = parse_list(&source.read_list(ALLOW_LIST).unwrap());
        assert!(allowed.contains("protonmail.com"));

        assert!(source.read_list("unknown.conf").is_none());
    }
}
