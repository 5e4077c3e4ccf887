//! Declared collections, their field order, and entity conversions

use super::FlatRecord;
use searchlog_types::{LogEntry, Memo, Record, Site};

pub const SITE_FIELDS: &[&str] = &["id", "name", "url"];
pub const LOG_FIELDS: &[&str] = &[
    "id", "site_id", "word", "url", "result", "extra1", "extra2", "parent_id",
];
pub const MEMO_FIELDS: &[&str] = &["id", "site_id", "word", "description"];
pub const RECORD_FIELDS: &[&str] = &["id", "title", "content"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Sites,
    Logs,
    Memos,
    Records,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Sites,
        Collection::Logs,
        Collection::Memos,
        Collection::Records,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Sites => "sites",
            Collection::Logs => "logs",
            Collection::Memos => "memos",
            Collection::Records => "records",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Sites => SITE_FIELDS,
            Collection::Logs => LOG_FIELDS,
            Collection::Memos => MEMO_FIELDS,
            Collection::Records => RECORD_FIELDS,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed row of one declared collection
pub trait Entity: Sized {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
    fn from_record(record: &FlatRecord) -> Self;
    fn to_record(&self) -> FlatRecord;
}

impl Entity for Site {
    const COLLECTION: Collection = Collection::Sites;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_record(r: &FlatRecord) -> Self {
        Site {
            id: r.get("id").to_string(),
            name: r.get("name").to_string(),
            url: r.get("url").to_string(),
        }
    }

    fn to_record(&self) -> FlatRecord {
        FlatRecord::new()
            .with("id", &self.id)
            .with("name", &self.name)
            .with("url", &self.url)
    }
}

impl Entity for LogEntry {
    const COLLECTION: Collection = Collection::Logs;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_record(r: &FlatRecord) -> Self {
        LogEntry {
            id: r.get("id").to_string(),
            site_id: r.get("site_id").to_string(),
            word: r.get("word").to_string(),
            url: r.get("url").to_string(),
            result: r.get("result").to_string(),
            extra1: r.get("extra1").to_string(),
            extra2: r.get("extra2").to_string(),
            parent_id: r.get("parent_id").to_string(),
        }
    }

    fn to_record(&self) -> FlatRecord {
        FlatRecord::new()
            .with("id", &self.id)
            .with("site_id", &self.site_id)
            .with("word", &self.word)
            .with("url", &self.url)
            .with("result", &self.result)
            .with("extra1", &self.extra1)
            .with("extra2", &self.extra2)
            .with("parent_id", &self.parent_id)
    }
}

impl Entity for Memo {
    const COLLECTION: Collection = Collection::Memos;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_record(r: &FlatRecord) -> Self {
        Memo {
            id: r.get("id").to_string(),
            site_id: r.get("site_id").to_string(),
            word: r.get("word").to_string(),
            description: r.get("description").to_string(),
        }
    }

    fn to_record(&self) -> FlatRecord {
        FlatRecord::new()
            .with("id", &self.id)
            .with("site_id", &self.site_id)
            .with("word", &self.word)
            .with("description", &self.description)
    }
}

impl Entity for Record {
    const COLLECTION: Collection = Collection::Records;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_record(r: &FlatRecord) -> Self {
        Record {
            id: r.get("id").to_string(),
            title: r.get("title").to_string(),
            content: r.get("content").to_string(),
        }
    }

    fn to_record(&self) -> FlatRecord {
        FlatRecord::new()
            .with("id", &self.id)
            .with("title", &self.title)
            .with("content", &self.content)
    }
}
