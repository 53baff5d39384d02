//! Person document.

use serde::{Deserialize, Serialize};

use super::PersonId;

/// A named owner of a list of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Store-generated identifier
    pub id: PersonId,
    /// Display name
    pub name: String,
}

impl Person {
    /// Creates a person document.
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
