//! Domain resolution engine
//!
//! Combines the built-in reference lists with caller-managed overrides.
//! Priority, highest first:
//!
//! 1. Custom allowed list
//! 2. Built-in allow list (disposable check only)
//! 3. Custom blocked list
//! 4. Built-in disposable list, including parent domains
//!
//! Input that does not yield a domain is never disposable, blocked or
//! allowed.

use crate::config::Config;
use crate::custom::CustomList;
use crate::domain::DomainInput;
use crate::matcher::domain_in_list;
use crate::store::{
    DirectorySource, EmbeddedSource, LazyList, ListSource, ALLOW_LIST, DISPOSABLE_LIST,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Decides whether email domains are disposable, blocked or allowed
///
/// Built-in lists load on first use and are cached for the lifetime of the
/// resolver. Custom lists can be changed at any time through `&self`; if the
/// resolver is shared, the caller decides how mutations and saves are ordered.
pub struct DomainResolver {
    /// Supplier of the built-in lists
    source: Box<dyn ListSource>,
    /// Built-in disposable domains
    disposable: LazyList,
    /// Built-in allow list
    builtin_allowed: LazyList,
    /// Caller-managed blocked domains
    blocked: CustomList,
    /// Caller-managed allowed domains
    allowed: CustomList,
}

impl std::fmt::Debug for DomainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainResolver")
            .field("disposable", &self.disposable)
            .field("builtin_allowed", &self.builtin_allowed)
            .field("blocked", &self.blocked)
            .field("allowed", &self.allowed)
            .finish_non_exhaustive()
    }
}

impl Default for DomainResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainResolver {
    /// Create a resolver over the bundled lists with no custom domains
    pub fn new() -> Self {
        Self::with_source(EmbeddedSource)
    }

    /// Create a resolver reading built-in lists from any source
    pub fn with_source<S: ListSource + 'static>(source: S) -> Self {
        Self::with_boxed_source(Box::new(source))
    }

    fn with_boxed_source(source: Box<dyn ListSource>) -> Self {
        Self {
            source,
            disposable: LazyList::new(DISPOSABLE_LIST),
            builtin_allowed: LazyList::new(ALLOW_LIST),
            blocked: CustomList::new(),
            allowed: CustomList::new(),
        }
    }

    /// Create a resolver with initial custom domains
    ///
    /// `list_path` overrides the directory of the built-in lists.
    pub fn with_lists<B, A, S, T>(blocked: B, allowed: A, list_path: Option<PathBuf>) -> Self
    where
        B: IntoIterator<Item = S>,
        S: AsRef<str>,
        A: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let resolver = Self::with_boxed_source(source_for(list_path.as_deref()));
        resolver.blocked.extend(blocked);
        resolver.allowed.extend(allowed);
        resolver
    }

    /// Create a resolver from configuration
    ///
    /// Custom list files are loaded and bound first; inline domains are
    /// added on top of them.
    pub fn from_config(config: &Config) -> Self {
        let resolver = Self::with_boxed_source(source_for(config.list_path.as_deref()));

        if let Some(ref path) = config.custom_blocked_file {
            resolver.blocked.load_file(path);
        }
        if let Some(ref path) = config.custom_allowed_file {
            resolver.allowed.load_file(path);
        }

        resolver.blocked.extend(&config.blocked);
        resolver.allowed.extend(&config.allowed);

        if config.preload {
            resolver.preload();
        }

        resolver
    }

    /// Load both built-in lists now rather than on first query
    pub fn preload(&self) {
        self.disposable.get(self.source.as_ref());
        self.builtin_allowed.get(self.source.as_ref());
    }

    /// Check if the domain is disposable
    pub fn is_disposable<'a>(&self, input: impl Into<DomainInput<'a>>) -> bool {
        match input.into().resolve() {
            Some(domain) => self.disposable_domain(&domain),
            None => false,
        }
    }

    /// Check if the domain is blocked, by a custom entry or as disposable
    pub fn is_blocked<'a>(&self, input: impl Into<DomainInput<'a>>) -> bool {
        let Some(domain) = input.into().resolve() else {
            return false;
        };

        if self.allowed.contains(&domain) {
            debug!("Domain {} is in the custom allow list", domain);
            return false;
        }
        if self.blocked.contains(&domain) {
            debug!("Domain {} is in the custom block list", domain);
            return true;
        }

        self.disposable_domain(&domain)
    }

    /// Check if the domain is explicitly allowed
    pub fn is_allowed<'a>(&self, input: impl Into<DomainInput<'a>>) -> bool {
        let Some(domain) = input.into().resolve() else {
            return false;
        };

        self.allowed.contains(&domain) || self.builtin_allow_list_contains(&domain)
    }

    /// Number of domains in the built-in disposable list
    pub fn count(&self) -> usize {
        self.disposable.get(self.source.as_ref()).len()
    }

    fn disposable_domain(&self, domain: &str) -> bool {
        if self.allowed.contains(domain) {
            debug!("Domain {} is in the custom allow list", domain);
            return false;
        }
        if self.builtin_allow_list_contains(domain) {
            debug!("Domain {} is in the built-in allow list", domain);
            return false;
        }
        if self.blocked.contains(domain) {
            debug!("Domain {} is in the custom block list", domain);
            return true;
        }

        let disposable = domain_in_list(domain, self.disposable.get(self.source.as_ref()));
        if disposable {
            debug!("Domain {} matches the disposable list", domain);
        }
        disposable
    }

    fn builtin_allow_list_contains(&self, domain: &str) -> bool {
        self.builtin_allowed.get(self.source.as_ref()).contains(domain)
    }
}

/// Bundled lists unless a directory overrides them
fn source_for(list_path: Option<&Path>) -> Box<dyn ListSource> {
    match list_path {
        Some(path) => Box::new(DirectorySource::new(path)),
        None => Box::new(EmbeddedSource),
    }
}

/// Custom list management
impl DomainResolver {
    /// Block a domain; input that yields no domain is ignored
    pub fn block(&self, domain: &str) {
        self.blocked.insert(domain);
    }

    /// Block several domains
    pub fn block_many<I, S>(&self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked.extend(domains);
    }

    /// Allow a domain; input that yields no domain is ignored
    pub fn allow(&self, domain: &str) {
        self.allowed.insert(domain);
    }

    /// Allow several domains
    pub fn allow_many<I, S>(&self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed.extend(domains);
    }

    /// Remove a domain from the custom blocked list
    pub fn unblock(&self, domain: &str) {
        self.blocked.remove(domain);
    }

    /// Remove a domain from the custom allowed list
    pub fn disallow(&self, domain: &str) {
        self.allowed.remove(domain);
    }

    /// Empty both custom lists
    pub fn clear(&self) {
        self.blocked.clear();
        self.allowed.clear();
    }

    /// Block a domain and optionally save the blocked list to its bound file
    ///
    /// Returns false only when `persist` is set and saving fails.
    pub fn add_blocked(&self, domain: &str, persist: bool) -> bool {
        self.block(domain);
        !persist || self.save_custom_blocked(None)
    }

    /// Allow a domain and optionally save the allowed list to its bound file
    pub fn add_allowed(&self, domain: &str, persist: bool) -> bool {
        self.allow(domain);
        !persist || self.save_custom_allowed(None)
    }

    /// Unblock a domain and optionally save the blocked list
    pub fn remove_blocked(&self, domain: &str, persist: bool) -> bool {
        self.unblock(domain);
        !persist || self.save_custom_blocked(None)
    }

    /// Disallow a domain and optionally save the allowed list
    pub fn remove_allowed(&self, domain: &str, persist: bool) -> bool {
        self.disallow(domain);
        !persist || self.save_custom_allowed(None)
    }

    /// Merge a JSON file into the custom blocked list and bind the list to it
    pub fn load_custom_blocked<P: AsRef<Path>>(&self, path: P) -> usize {
        self.blocked.load_file(path)
    }

    /// Merge a JSON file into the custom allowed list and bind the list to it
    pub fn load_custom_allowed<P: AsRef<Path>>(&self, path: P) -> usize {
        self.allowed.load_file(path)
    }

    /// Save the custom blocked list to `path` or to its bound file
    pub fn save_custom_blocked(&self, path: Option<&Path>) -> bool {
        self.blocked.save_file(path)
    }

    /// Save the custom allowed list to `path` or to its bound file
    pub fn save_custom_allowed(&self, path: Option<&Path>) -> bool {
        self.allowed.save_file(path)
    }

    /// Custom blocked domains, sorted
    pub fn custom_blocked(&self) -> Vec<String> {
        self.blocked.domains()
    }

    /// Custom allowed domains, sorted
    pub fn custom_allowed(&self) -> Vec<String> {
        self.allowed.domains()
    }

    /// Number of custom blocked domains
    pub fn custom_blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Number of custom allowed domains
    pub fn custom_allowed_count(&self) -> usize {
        self.allowed.len()
    }

    /// File the custom blocked list is bound to
    pub fn blocked_binding(&self) -> Option<PathBuf> {
        self.blocked.binding()
    }

    /// File the custom allowed list is bound to
    pub fn allowed_binding(&self) -> Option<PathBuf> {
        self.allowed.binding()
    }
}
