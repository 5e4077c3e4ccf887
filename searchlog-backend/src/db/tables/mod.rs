mod logs;
mod memos;
mod records;
mod sites;
