//! Memo operations, including conversion into a log draft

use searchlog_types::{LogDraft, Memo, MemoInput, MemoView};

use super::super::{new_id, Database};
use crate::error::DbResult;

/// Site name shown for memos without a (known) site
pub const UNSPECIFIED_SITE: &str = "unspecified";

impl Database {
    pub fn list_memos(&self) -> DbResult<Vec<Memo>> {
        self.read_all()
    }

    /// Memos annotated with their site names
    pub fn list_memo_views(&self) -> DbResult<Vec<MemoView>> {
        let site_names = self.site_names()?;
        Ok(self
            .list_memos()?
            .into_iter()
            .map(|memo| MemoView {
                site_name: site_names
                    .get(&memo.site_id)
                    .cloned()
                    .unwrap_or_else(|| UNSPECIFIED_SITE.to_string()),
                memo,
            })
            .collect())
    }

    pub fn get_memo(&self, id: &str) -> DbResult<Memo> {
        self.find("memo", id)
    }

    pub fn create_memo(&self, input: MemoInput) -> DbResult<String> {
        let id = new_id();
        self.insert(Memo {
            id: id.clone(),
            site_id: input.site_id,
            word: input.word,
            description: input.description,
        })?;
        log::info!("[MEMOS] Created memo {}", id);
        Ok(id)
    }

    pub fn update_memo(&self, id: &str, input: MemoInput) -> DbResult<bool> {
        self.update_where(id, |memo: &mut Memo| {
            memo.site_id = input.site_id;
            memo.word = input.word;
            memo.description = input.description;
        })
    }

    pub fn delete_memo(&self, id: &str) -> DbResult<bool> {
        self.remove::<Memo>(id)
    }

    /// Prefill for a new log: the memo's description becomes the result.
    /// The memo itself is left untouched.
    pub fn convert_memo(&self, id: &str) -> DbResult<LogDraft> {
        let memo = self.get_memo(id)?;
        Ok(LogDraft {
            site_id: memo.site_id,
            word: memo.word,
            result: memo.description,
        })
    }
}
