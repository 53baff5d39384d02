//! In-memory store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use swatch_core::{Item, ItemId, Person, PersonId};
use tokio::sync::RwLock;

use crate::{ListStore, RemovedPerson, Result};

#[derive(Debug, Default)]
struct Collections {
    persons: BTreeMap<PersonId, Person>,
    items: BTreeMap<ItemId, Item>,
}

/// Process-local [`ListStore`].
///
/// Every multi-document operation runs under a single write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_persons(&self, limit: usize) -> Result<Vec<Person>> {
        let inner = self.inner.read().await;
        Ok(inner.persons.values().take(limit).cloned().collect())
    }

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>> {
        Ok(self.inner.read().await.persons.get(&id).cloned())
    }

    async fn insert_person(&self, name: &str) -> Result<Person> {
        let person = Person::new(PersonId::generate(), name);
        self.inner
            .write()
            .await
            .persons
            .insert(person.id, person.clone());
        Ok(person)
    }

    async fn remove_person(&self, id: PersonId) -> Result<RemovedPerson> {
        let mut inner = self.inner.write().await;
        let person_removed = inner.persons.remove(&id).is_some();
        let before = inner.items.len();
        inner.items.retain(|_, item| !item.is_owned_by(id));
        Ok(RemovedPerson {
            person_removed,
            items_removed: before - inner.items.len(),
        })
    }

    async fn list_items(&self, owner: PersonId, limit: usize) -> Result<Vec<Item>> {
        let inner = self.inner.read().await;
        Ok(inner
            .items
            .values()
            .filter(|item| item.is_owned_by(owner))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn insert_item(&self, owner: PersonId, value: &str) -> Result<Item> {
        let item = Item::new(ItemId::generate(), value, owner);
        self.inner.write().await.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item_value(&self, id: ItemId, value: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.items.get_mut(&id) {
            Some(item) => {
                item.value = value.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_item(&self, id: ItemId) -> Result<bool> {
        Ok(self.inner.write().await.items.remove(&id).is_some())
    }

    async fn create_person_with_items(
        &self,
        name: &str,
        values: &[String],
    ) -> Result<(Person, Vec<Item>)> {
        let person = Person::new(PersonId::generate(), name);
        let items: Vec<Item> = values
            .iter()
            .map(|value| Item::new(ItemId::generate(), value.as_str(), person.id))
            .collect();

        let mut inner = self.inner.write().await;
        inner.persons.insert(person.id, person.clone());
        for item in &items {
            inner.items.insert(item.id, item.clone());
        }
        Ok((person, items))
    }
}
