//! Record Store: load/save of flat, all-text collections
//!
//! The store knows nothing about sites or logs: it moves ordered
//! `field name -> text` mappings between memory and durable storage.
//! Typed entities convert through [`schema::Entity`].

pub mod csv_store;
pub mod file_ops;
#[cfg(test)]
pub mod memory_store;
pub mod schema;

pub use csv_store::CsvRecordStore;
#[cfg(test)]
pub use memory_store::MemoryRecordStore;
pub use schema::{Collection, Entity};

use crate::error::StoreError;

/// One row of a collection: field names to text, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    fields: Vec<(String, String)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, or `""` when the field is absent
    pub fn get(&self, field: &str) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Set `field`, keeping its original position if already present
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field.to_string(), value)),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of this record holding exactly `field_names`, in that order
    pub fn project(&self, field_names: &[&str]) -> FlatRecord {
        FlatRecord {
            fields: field_names
                .iter()
                .map(|f| (f.to_string(), self.get(f).to_string()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = FlatRecord::new();
        for (k, v) in iter {
            let name: String = k.into();
            record.set(&name, v);
        }
        record
    }
}

/// Durable storage for named collections of flat records.
///
/// Implementations must round-trip every field exactly: `save` followed by
/// `load` yields the same text values in the same order.
pub trait RecordStore: Send + Sync {
    /// All records of `collection` in storage order. Empty when nothing
    /// has been stored yet.
    fn load(&self, collection: Collection) -> Result<Vec<FlatRecord>, StoreError>;

    /// Replace the stored collection with `records`, written as
    /// `field_names` columns. Fields a record lacks are stored empty.
    fn save(
        &self,
        collection: Collection,
        field_names: &[&str],
        records: &[FlatRecord],
    ) -> Result<(), StoreError>;

    /// Create an empty collection with just its header if none exists yet
    fn ensure(&self, collection: Collection, field_names: &[&str]) -> Result<(), StoreError>;
}
