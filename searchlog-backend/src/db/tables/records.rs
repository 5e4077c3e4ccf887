//! Markdown record operations. Content is stored as Markdown source.

use searchlog_types::{Record, RecordInput};

use super::super::{new_id, Database};
use crate::error::DbResult;

impl Database {
    pub fn list_records(&self) -> DbResult<Vec<Record>> {
        self.read_all()
    }

    pub fn get_record(&self, id: &str) -> DbResult<Record> {
        self.find("record", id)
    }

    pub fn create_record(&self, input: RecordInput) -> DbResult<String> {
        let id = new_id();
        self.insert(Record {
            id: id.clone(),
            title: input.title,
            content: input.content,
        })?;
        log::info!("[RECORDS] Created record {}", id);
        Ok(id)
    }

    pub fn update_record(&self, id: &str, input: RecordInput) -> DbResult<bool> {
        self.update_where(id, |record: &mut Record| {
            record.title = input.title;
            record.content = input.content;
        })
    }

    pub fn delete_record(&self, id: &str) -> DbResult<bool> {
        self.remove::<Record>(id)
    }
}
