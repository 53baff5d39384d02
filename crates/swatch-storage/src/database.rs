//! Persistent store backed by a single redb file.
//!
//! Documents are stored as JSON in two tables keyed by the id's integer form,
//! so a plain table scan yields creation order. redb is synchronous; every
//! operation runs on the blocking pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use swatch_core::{Item, ItemId, Person, PersonId};

use crate::{ListStore, RemovedPerson, Result};

const PERSONS: TableDefinition<u128, &[u8]> = TableDefinition::new("persons");
const ITEMS: TableDefinition<u128, &[u8]> = TableDefinition::new("items");

/// [`ListStore`] over an embedded redb database.
///
/// Cascading deletes and list copies each run in one write transaction.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) the database at `path` and ensure both tables exist.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path)?;
        let txn = db.begin_write()?;
        {
            txn.open_table(PERSONS)?;
            txn.open_table(ITEMS)?;
        }
        txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || op(&db)).await?
    }

    async fn write<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&WriteTransaction) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.blocking(move |db| {
            let txn = db.begin_write()?;
            let out = op(&txn)?;
            txn.commit()?;
            Ok(out)
        })
        .await
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

fn encode<T: Serialize>(doc: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(doc)?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Scan `table`, keeping up to `limit` decoded documents that pass `keep`.
fn scan<T, K>(table: &T, limit: usize, keep: impl Fn(&K) -> bool) -> Result<Vec<K>>
where
    T: ReadableTable<u128, &'static [u8]>,
    K: DeserializeOwned,
{
    let mut out = Vec::new();
    for entry in table.iter()? {
        if out.len() >= limit {
            break;
        }
        let (_, value) = entry?;
        let doc: K = decode(value.value())?;
        if keep(&doc) {
            out.push(doc);
        }
    }
    Ok(out)
}

fn insert_items(txn: &WriteTransaction, items: &[Item]) -> Result<()> {
    let mut table = txn.open_table(ITEMS)?;
    for item in items {
        table.insert(item.id.to_key(), encode(item)?.as_slice())?;
    }
    Ok(())
}

#[async_trait]
impl ListStore for RedbStore {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    async fn list_persons(&self, limit: usize) -> Result<Vec<Person>> {
        self.blocking(move |db| {
            let txn = db.begin_read()?;
            let table = txn.open_table(PERSONS)?;
            scan(&table, limit, |_: &Person| true)
        })
        .await
    }

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>> {
        self.blocking(move |db| {
            let txn = db.begin_read()?;
            let table = txn.open_table(PERSONS)?;
            match table.get(id.to_key())? {
                Some(guard) => Ok(Some(decode(guard.value())?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn insert_person(&self, name: &str) -> Result<Person> {
        let person = Person::new(PersonId::generate(), name);
        let doc = encode(&person)?;
        self.write(move |txn| {
            let mut table = txn.open_table(PERSONS)?;
            table.insert(person.id.to_key(), doc.as_slice())?;
            Ok(person)
        })
        .await
    }

    async fn remove_person(&self, id: PersonId) -> Result<RemovedPerson> {
        self.write(move |txn| {
            let person_removed = txn.open_table(PERSONS)?.remove(id.to_key())?.is_some();

            let mut items = txn.open_table(ITEMS)?;
            let owned: Vec<u128> = scan(&items, usize::MAX, |item: &Item| item.is_owned_by(id))?
                .iter()
                .map(|item| item.id.to_key())
                .collect();
            for key in &owned {
                items.remove(*key)?;
            }

            Ok(RemovedPerson {
                person_removed,
                items_removed: owned.len(),
            })
        })
        .await
    }

    async fn list_items(&self, owner: PersonId, limit: usize) -> Result<Vec<Item>> {
        self.blocking(move |db| {
            let txn = db.begin_read()?;
            let table = txn.open_table(ITEMS)?;
            scan(&table, limit, |item: &Item| item.is_owned_by(owner))
        })
        .await
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        self.blocking(move |db| {
            let txn = db.begin_read()?;
            let table = txn.open_table(ITEMS)?;
            match table.get(id.to_key())? {
                Some(guard) => Ok(Some(decode(guard.value())?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn insert_item(&self, owner: PersonId, value: &str) -> Result<Item> {
        let item = Item::new(ItemId::generate(), value, owner);
        self.write(move |txn| {
            insert_items(txn, std::slice::from_ref(&item))?;
            Ok(item)
        })
        .await
    }

    async fn update_item_value(&self, id: ItemId, value: &str) -> Result<bool> {
        let value = value.to_string();
        self.write(move |txn| {
            let mut table = txn.open_table(ITEMS)?;
            let existing = table.get(id.to_key())?.map(|guard| guard.value().to_vec());
            let Some(bytes) = existing else {
                return Ok(false);
            };
            let mut item: Item = decode(&bytes)?;
            item.value = value;
            table.insert(id.to_key(), encode(&item)?.as_slice())?;
            Ok(true)
        })
        .await
    }

    async fn remove_item(&self, id: ItemId) -> Result<bool> {
        self.write(move |txn| Ok(txn.open_table(ITEMS)?.remove(id.to_key())?.is_some()))
            .await
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
        let doc = encode(&person)?;

        self.write(move |txn| {
            txn.open_table(PERSONS)?
                .insert(person.id.to_key(), doc.as_slice())?;
            insert_items(txn, &items)?;
            Ok((person, items))
        })
        .await
    }
}
