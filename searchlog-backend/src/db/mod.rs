//! Entity repositories over an injected RecordStore
//!
//! Nothing is cached between calls: every operation loads the collection,
//! works on it in memory and writes the whole collection back. Each
//! collection has its own lock, held for the full load/modify/save cycle.

pub mod tables;

use crate::error::{DbError, DbResult, StoreError};
use crate::store::{Collection, Entity, RecordStore};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Outcome of a read-modify-write closure: whether to write back
pub enum Change<R> {
    Changed(R),
    Unchanged(R),
}

struct CollectionLocks {
    sites: Mutex<()>,
    logs: Mutex<()>,
    memos: Mutex<()>,
    records: Mutex<()>,
}

impl CollectionLocks {
    fn new() -> Self {
        Self {
            sites: Mutex::new(()),
            logs: Mutex::new(()),
            memos: Mutex::new(()),
            records: Mutex::new(()),
        }
    }

    fn lock(&self, collection: Collection) -> MutexGuard<'_, ()> {
        match collection {
            Collection::Sites => self.sites.lock(),
            Collection::Logs => self.logs.lock(),
            Collection::Memos => self.memos.lock(),
            Collection::Records => self.records.lock(),
        }
    }
}

pub struct Database {
    store: Arc<dyn RecordStore>,
    locks: CollectionLocks,
}

impl Database {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            locks: CollectionLocks::new(),
        }
    }

    /// Create any missing collection with just its header
    pub fn init(&self) -> DbResult<()> {
        for collection in Collection::ALL {
            let _guard = self.locks.lock(collection);
            self.store.ensure(collection, collection.fields())?;
        }
        Ok(())
    }

    fn load_unlocked<E: Entity>(&self) -> Result<Vec<E>, StoreError> {
        Ok(self
            .store
            .load(E::COLLECTION)?
            .iter()
            .map(E::from_record)
            .collect())
    }

    fn save_unlocked<E: Entity>(&self, items: &[E]) -> Result<(), StoreError> {
        let records: Vec<_> = items.iter().map(E::to_record).collect();
        self.store
            .save(E::COLLECTION, E::COLLECTION.fields(), &records)
    }

    /// Snapshot of a whole collection
    pub(crate) fn read_all<E: Entity>(&self) -> DbResult<Vec<E>> {
        let _guard = self.locks.lock(E::COLLECTION);
        Ok(self.load_unlocked::<E>()?)
    }

    /// Load, apply `f`, and write back if `f` reports a change.
    /// Nothing is written when `f` fails.
    pub(crate) fn modify<E, R, F>(&self, f: F) -> DbResult<R>
    where
        E: Entity,
        F: FnOnce(Vec<E>) -> DbResult<Change<(Vec<E>, R)>>,
    {
        let _guard = self.locks.lock(E::COLLECTION);
        let items = self.load_unlocked::<E>()?;
        match f(items)? {
            Change::Changed((items, result)) => {
                self.save_unlocked(&items)?;
                Ok(result)
            }
            Change::Unchanged((_, result)) => Ok(result),
        }
    }

    pub(crate) fn find<E: Entity>(&self, kind: &'static str, id: &str) -> DbResult<E> {
        self.read_all::<E>()?
            .into_iter()
            .find(|e| e.id() == id)
            .ok_or_else(|| DbError::not_found(kind, id))
    }

    /// Append a new entity
    pub(crate) fn insert<E: Entity>(&self, entity: E) -> DbResult<()> {
        self.modify::<E, _, _>(|mut items| {
            items.push(entity);
            Ok(Change::Changed((items, ())))
        })
    }

    /// Apply `edit` to the entity with `id`. Returns false if absent.
    pub(crate) fn update_where<E: Entity>(&self, id: &str, edit: impl FnOnce(&mut E)) -> DbResult<bool> {
        self.modify::<E, _, _>(|mut items| {
            let position = items.iter().position(|e| e.id() == id);
            match position {
                Some(i) => {
                    edit(&mut items[i]);
                    Ok(Change::Changed((items, true)))
                }
                None => Ok(Change::Unchanged((items, false))),
            }
        })
    }

    /// Drop the entity with `id`. Returns false if it was already absent.
    pub(crate) fn remove<E: Entity>(&self, id: &str) -> DbResult<bool> {
        self.modify::<E, _, _>(|items| {
            let before = items.len();
            let kept: Vec<E> = items.into_iter().filter(|e| e.id() != id).collect();
            if kept.len() == before {
                Ok(Change::Unchanged((kept, false)))
            } else {
                Ok(Change::Changed((kept, true)))
            }
        })
    }
}

/// Fresh opaque identifier for a new entity
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
pub(crate) fn test_db() -> Database {
    let db = Database::new(Arc::new(crate::store::MemoryRecordStore::new()));
    db.init().unwrap();
    db
}
