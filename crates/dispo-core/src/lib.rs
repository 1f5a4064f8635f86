//! # dispo core
//!
//! Decides whether an email domain is disposable, blocked or allowed.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Normalization** - addresses and domains reduced to a lowercase bare domain
//! - **Built-in lists** - large static disposable/allow lists, loaded lazily
//! - **Subdomain matching** - a listed domain covers its subdomains
//! - **Custom lists** - blocked/allowed overrides with JSON persistence
//! - **Configuration** - TOML description of a resolver
//!
//! ## Example
//!
//! ```rust,no_run
//! use dispo_core::DomainResolver;
//!
//! let resolver = DomainResolver::new();
//! resolver.block("spam-relay.net");
//! resolver.allow("partner.example");
//!
//! if resolver.is_blocked("someone@mailinator.com") {
//!     println!("rejected");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod custom;
pub mod domain;
pub mod error;
pub mod matcher;
pub mod resolver;
pub mod store;

// Re-exports for convenience
pub use config::Config;
pub use custom::CustomList;
pub use domain::{normalize, DomainInput, DomainProvider};
pub use error::{Error, Result};
pub use resolver::DomainResolver;
pub use store::{DirectorySource, DomainSet, EmbeddedSource, ListSource, MemorySource};
