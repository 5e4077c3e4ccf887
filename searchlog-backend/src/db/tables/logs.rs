//! Log operations: CRUD plus the tree-shaped listing, cascading deletes
//! and reparenting, all delegated to `log_tree`.

use searchlog_types::{LogDetail, LogEntry, LogInput, LogTreeNode, LogUpdate};

use super::super::{new_id, Change, Database};
use crate::error::DbResult;
use crate::log_tree::{self, UNKNOWN_SITE};

impl Database {
    pub fn list_logs(&self) -> DbResult<Vec<LogEntry>> {
        self.read_all()
    }

    pub fn get_log(&self, id: &str) -> DbResult<LogEntry> {
        self.find("log", id)
    }

    /// A log with its site name (`"unknown"` if the site is gone)
    pub fn log_detail(&self, id: &str) -> DbResult<LogDetail> {
        let log = self.get_log(id)?;
        let site_name = self
            .site_names()?
            .remove(&log.site_id)
            .unwrap_or_else(|| UNKNOWN_SITE.to_string());
        Ok(LogDetail { log, site_name })
    }

    /// Forest of logs annotated with site names. With `site_id`, only that
    /// site's root logs are listed, each with its full subtree.
    pub fn log_tree(&self, site_id: Option<&str>) -> DbResult<Vec<LogTreeNode>> {
        let site_names = self.site_names()?;
        let logs = self.list_logs()?;

        let mut tree = match site_id.filter(|s| !s.is_empty()) {
            Some(site_id) => log_tree::site_tree(&logs, site_id),
            None => log_tree::build_tree(&logs, ""),
        };
        log_tree::annotate_site_names(&mut tree, &site_names);
        Ok(tree)
    }

    pub fn create_log(&self, input: LogInput) -> DbResult<String> {
        let id = new_id();
        self.insert(LogEntry {
            id: id.clone(),
            site_id: input.site_id,
            word: input.word,
            url: input.url,
            result: input.result,
            extra1: input.extra1,
            extra2: input.extra2,
            parent_id: input.parent_id,
        })?;
        log::info!("[LOGS] Created log {}", id);
        Ok(id)
    }

    /// Update the editable fields. Returns false when no log has `id`.
    pub fn update_log(&self, id: &str, update: LogUpdate) -> DbResult<bool> {
        self.update_where(id, |log: &mut LogEntry| {
            log.word = update.word;
            log.url = update.url;
            log.result = update.result;
            log.extra1 = update.extra1;
            log.extra2 = update.extra2;
        })
    }

    /// Delete a log and its whole subtree. Returns the removed ids, empty
    /// when the log did not exist.
    pub fn delete_log(&self, id: &str) -> DbResult<Vec<String>> {
        let removed = self.modify::<LogEntry, _, _>(|logs| {
            let removal = log_tree::delete_subtree(&logs, id);
            Ok(removal_change(removal))
        })?;
        if !removed.is_empty() {
            log::info!("[LOGS] Deleted log {} ({} with descendants)", id, removed.len());
        }
        Ok(removed)
    }

    /// Delete every log of a site together with the subtrees below them
    pub fn delete_logs_by_site(&self, site_id: &str) -> DbResult<Vec<String>> {
        let removed = self.modify::<LogEntry, _, _>(|logs| {
            let removal = log_tree::delete_by_site(&logs, site_id);
            Ok(removal_change(removal))
        })?;
        log::info!("[LOGS] Deleted {} logs for site {}", removed.len(), site_id);
        Ok(removed)
    }

    pub fn delete_all_logs(&self) -> DbResult<usize> {
        let count = self.modify::<LogEntry, _, _>(|logs| {
            let count = logs.len();
            Ok(Change::Changed((Vec::new(), count)))
        })?;
        log::info!("[LOGS] Deleted all {} logs", count);
        Ok(count)
    }

    /// Reparent a log (`None` = root). Fails with not-found for an unknown
    /// log and with a cycle error when `target_id` is inside its subtree.
    pub fn move_log(&self, log_id: &str, target_id: Option<&str>) -> DbResult<()> {
        self.modify::<LogEntry, _, _>(|logs| {
            let moved = log_tree::move_log(&logs, log_id, target_id)?;
            Ok(Change::Changed((moved, ())))
        })?;
        log::info!(
            "[LOGS] Moved log {} under {}",
            log_id,
            target_id.filter(|t| !t.is_empty()).unwrap_or("<root>")
        );
        Ok(())
    }
}

fn removal_change(removal: log_tree::Removal) -> Change<(Vec<LogEntry>, Vec<String>)> {
    if removal.removed.is_empty() {
        Change::Unchanged((removal.remaining, removal.removed))
    } else {
        Change::Changed((removal.remaining, removal.removed))
    }
}
