//! # swatch-storage
//!
//! Document store backends for Swatch.
//!
//! This crate provides:
//! - The [`ListStore`] trait, the only way handlers touch persisted data
//! - [`MemoryStore`], a process-local backend (default, and used in tests)
//! - [`RedbStore`], a single-file persistent backend
//! - [`open_store`], which picks a backend from [`StoreConfig`]

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod database;
pub mod error;
pub mod memory;
pub mod traits;


use std::sync::Arc;

use swatch_core::{StoreBackend, StoreConfig};

pub use database::RedbStore;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use traits::{ListStore, RemovedPerson};

/// Open the backend selected by `config`.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn ListStore>> {
    match config.backend {
        StoreBackend::Memory => {
            log::info!("Using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redb => {
            log::info!("Using redb document store at {}", config.path.display());
            Ok(Arc::new(RedbStore::open(&config.path)?))
        }
    }
}
