//! Swatch Core: shared types, errors, and configuration.
//!
//! This crate provides the foundational types used across all Swatch crates.
//! It has no internal Swatch dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Identifiers and the `Person` / `Item` documents
//! - [`config`]: `SwatchConfig` loading, defaults, and environment overrides

pub mod config;
pub mod error;
pub mod types;

// Re-export key types at crate root for convenience
pub use config::{LoggingConfig, ServerConfig, SessionBackend, SessionConfig, StoreBackend, StoreConfig, SwatchConfig};
pub use error::{Error, Result};
pub use types::{Item, ItemId, Person, PersonId};

/// Maximum number of persons shown on the dashboard and in the copy picker.
pub const DASHBOARD_LIMIT: usize = 10;

/// Maximum number of items shown on a person's list.
pub const ITEM_LIST_LIMIT: usize = 50;

/// Maximum number of items cloned by the copy-list flow.
pub const COPY_LIMIT: usize = 10;
