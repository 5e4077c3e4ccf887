//! In-memory RecordStore, used by repository and controller tests

use super::{Collection, FlatRecord, RecordStore};
use crate::error::StoreError;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryRecordStore {
    collections: Mutex<HashMap<Collection, Vec<FlatRecord>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self, collection: Collection) -> Result<Vec<FlatRecord>, StoreError> {
        Ok(self
            .collections
            .lock()
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    fn save(
        &self,
        collection: Collection,
        field_names: &[&str],
        records: &[FlatRecord],
    ) -> Result<(), StoreError> {
        let rows = records.iter().map(|r| r.project(field_names)).collect();
        self.collections.lock().insert(collection, rows);
        Ok(())
    }

    fn ensure(&self, collection: Collection, _field_names: &[&str]) -> Result<(), StoreError> {
        self.collections.lock().entry(collection).or_default();
        Ok(())
    }
}
