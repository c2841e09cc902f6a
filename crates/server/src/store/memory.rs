//! In-memory entity store.
//!
//! Records live in a `BTreeMap` keyed by the raw id, which keeps the natural
//! iteration order ascending by id. Identifier generation is a monotonic
//! counter; saving an entity that already carries an id advances the counter
//! past it so generated ids never collide with upserted ones.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use shop_registry_core::Entity;

use super::{EntityStore, Sort, SortDirection, StoreError};

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryStore<T> {
    records: RwLock<BTreeMap<i64, T>>,
    sequence: AtomicI64,
}

impl<T> InMemoryStore<T> {
    /// Create an empty store. The first generated id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }
}

impl<T> EntityStore<T> for InMemoryStore<T>
where
    T: Entity + Clone + Send + Sync,
{
    fn save(&self, mut entity: T) -> Result<T, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;

        let raw = match entity.id() {
            Some(id) => {
                let raw = id.into();
                self.sequence.fetch_max(raw, Ordering::SeqCst);
                raw
            }
            None => {
                let raw = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
                entity.set_id(T::Id::from(raw));
                raw
            }
        };

        records.insert(raw, entity.clone());
        Ok(entity)
    }

    fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.get(&id.into()).cloned())
    }

    fn find_all(&self, sort: Sort) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut all: Vec<T> = records.values().cloned().collect();
        if sort.direction == SortDirection::Desc {
            all.reverse();
        }
        Ok(all)
    }

    fn exists_by_id(&self, id: T::Id) -> Result<bool, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.contains_key(&id.into()))
    }

    fn delete_by_id(&self, id: T::Id) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.remove(&id.into());
        Ok(())
    }
}
