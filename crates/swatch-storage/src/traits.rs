//! Store trait
//!
//! Handlers see persisted data only through [`ListStore`]. Backends are free
//! to make multi-document operations atomic; both bundled backends do.

use async_trait::async_trait;
use swatch_core::{Item, ItemId, Person, PersonId};

use crate::Result;

/// Outcome of [`ListStore::remove_person`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedPerson {
    /// Whether a person document was removed
    pub person_removed: bool,
    /// How many items owned by the person were removed
    pub items_removed: usize,
}

/// Access to the `persons` and `items` collections.
///
/// Listings return documents in the store's default order, which is
/// ascending id (creation order). Ownership is not enforced here: callers
/// must only pass owners they have looked up.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Up to `limit` persons.
    async fn list_persons(&self, limit: usize) -> Result<Vec<Person>>;

    /// A single person, if it exists.
    async fn get_person(&self, id: PersonId) -> Result<Option<Person>>;

    /// Insert a new person and return it with its generated id.
    async fn insert_person(&self, name: &str) -> Result<Person>;

    /// Remove a person and every item it owns.
    ///
    /// Removing a missing person is not an error; orphaned items left by an
    /// earlier partial failure are still swept.
    async fn remove_person(&self, id: PersonId) -> Result<RemovedPerson>;

    /// Up to `limit` items owned by `owner`.
    async fn list_items(&self, owner: PersonId, limit: usize) -> Result<Vec<Item>>;

    /// A single item, if it exists.
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>>;

    /// Insert a new item owned by `owner`.
    async fn insert_item(&self, owner: PersonId, value: &str) -> Result<Item>;

    /// Replace an item's value, leaving id and owner untouched.
    ///
    /// Returns `false` if no such item exists.
    async fn update_item_value(&self, id: ItemId, value: &str) -> Result<bool>;

    /// Remove one item. Returns `false` if it was already gone.
    async fn remove_item(&self, id: ItemId) -> Result<bool>;

    /// Create a person and give it fresh items with the given values.
    async fn create_person_with_items(
        &self,
        name: &str,
        values: &[String],
    ) -> Result<(Person, Vec<Item>)>;
}
