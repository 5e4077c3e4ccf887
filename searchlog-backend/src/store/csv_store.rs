//! CsvRecordStore: one UTF-8 CSV file per collection
//!
//! Files live in a single data directory as `sites.csv`, `logs.csv`,
//! `memos.csv` and `records.csv`. The first row is the header; rows are
//! keyed by it on load.

use super::{file_ops, Collection, FlatRecord, RecordStore};
use crate::error::StoreError;
use std::path::PathBuf;

pub struct CsvRecordStore {
    data_dir: PathBuf,
}

impl CsvRecordStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

/// Parse CSV text into records keyed by its header row
fn parse_rows(content: &[u8]) -> Result<Vec<FlatRecord>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: FlatRecord = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name, row.get(i).unwrap_or("")))
            .collect();
        rows.push(record);
    }
    Ok(rows)
}

/// Render a header row plus one row per record
fn render_rows(field_names: &[&str], records: &[FlatRecord]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(field_names)?;
    for record in records {
        writer.write_record(field_names.iter().map(|f| record.get(f)))?;
    }
    writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))
}

impl RecordStore for CsvRecordStore {
    fn load(&self, collection: Collection) -> Result<Vec<FlatRecord>, StoreError> {
        let path = self.path_for(collection);
        match file_ops::read_if_exists(&path)? {
            Some(content) => parse_rows(&content),
            None => Ok(Vec::new()),
        }
    }

    fn save(
        &self,
        collection: Collection,
        field_names: &[&str],
        records: &[FlatRecord],
    ) -> Result<(), StoreError> {
        let content = render_rows(field_names, records)?;
        file_ops::write_atomic(&self.path_for(collection), &content)?;
        log::debug!("[STORE] Wrote {} rows to {}", records.len(), collection.file_name());
        Ok(())
    }

    fn ensure(&self, collection: Collection, field_names: &[&str]) -> Result<(), StoreError> {
        let path = self.path_for(collection);
        if !path.exists() {
            self.save(collection, field_names, &[])?;
            log::info!("[STORE] Created {}", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::{LOG_FIELDS, RECORD_FIELDS, SITE_FIELDS};
    use tempfile::tempdir;

    fn record(pairs: &[(&str, &str)]) -> FlatRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = CsvRecordStore::new(dir.path()).unwrap();
        assert!(store.load(Collection::Logs).unwrap().is_empty());
    }

    #[test]
    fn test_ensure_writes_header_only() {
        let dir = tempdir().unwrap();
        let store = CsvRecordStore::new(dir.path()).unwrap();

        store.ensure(Collection::Sites, SITE_FIELDS).unwrap();

        let content = std::fs::read_to_string(dir.path().join("sites.csv")).unwrap();
        assert_eq!(content.trim_end(), "id,name,url");
        assert!(store.load(Collection::Sites).unwrap().is_empty());
    }

    #[test]
    fn test_ensure_keeps_existing_rows() {
        let dir = tempdir().unwrap();
        let store = CsvRecordStore::new(dir.path()).unwrap();
        let rows = vec![record(&[("id", "s1"), ("name", "Docs"), ("url", "https://docs.rs")])];

        store.save(Collection::Sites, SITE_FIELDS, &rows).unwrap();
        store.ensure(Collection::Sites, SITE_FIELDS).unwrap();

        assert_eq!(store.load(Collection::Sites).unwrap(), rows);
    }

    #[test]
    fn test_round_trip_preserves_text_and_order() {
        let dir = tempdir().unwrap();
        let store = CsvRecordStore::new(dir.path()).unwrap();
        let rows = vec![
            record(&[
                ("id", "r2"),
                ("title", "Quotes \"and\", commas"),
                ("content", "# Heading\n\n```rust\nfn main() {}\n```\r\n| a | b |"),
            ]),
            record(&[("id", "r1"), ("title", "日本語のタイトル"), ("content", "")]),
        ];

        store.save(Collection::Records, RECORD_FIELDS, &rows).unwrap();
        let loaded = store.load(Collection::Records).unwrap();

        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_missing_fields_serialize_empty() {
        let dir = tempdir().unwrap();
        let store = CsvRecordStore::new(dir.path()).unwrap();

        store
            .save(Collection::Logs, LOG_FIELDS, &[record(&[("id", "a"), ("word", "w")])])
            .unwrap();
        let loaded = store.load(Collection::Logs).unwrap();

        assert_eq!(loaded.len(), 1);
        let names: Vec<&str> = loaded[0].iter().map(|(k, _)| k).collect();
        assert_eq!(names, LOG_FIELDS);
        assert_eq!(loaded[0].get("word"), "w");
        assert_eq!(loaded[0].get("parent_id"), "");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let dir = tempdir().unwrap();
        let store = CsvRecordStore::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("sites.csv"), "id,name,url\ns1,Docs\n").unwrap();

        let loaded = store.load(Collection::Sites).unwrap();
        assert_eq!(loaded[0].get("name"), "Docs");
        assert_eq!(loaded[0].get("url"), "");
    }
}
