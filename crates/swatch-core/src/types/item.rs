//! Item ("colour") document.

use serde::{Deserialize, Serialize};

use super::{ItemId, PersonId};

/// A string value owned by exactly one [`Person`](crate::Person).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Store-generated identifier
    pub id: ItemId,
    /// The colour text
    pub value: String,
    /// Owning person; never changes after creation
    pub owner_id: PersonId,
}

impl Item {
    /// Creates an item document.
    pub fn new(id: ItemId, value: impl Into<String>, owner_id: PersonId) -> Self {
        Self {
            id,
            value: value.into(),
            owner_id,
        }
    }

    /// Returns whether this item belongs to `owner`.
    pub fn is_owned_by(&self, owner: PersonId) -> bool {
        self.owner_id == owner
    }
}
