//! Shared handler state.

use std::sync::Arc;

use swatch_storage::ListStore;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The document store
    pub store: Arc<dyn ListStore>,
}

impl AppState {
    /// Create state around a store.
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }
}
