//! Error types for storage, the log tree and the repositories.

use thiserror::Error;

/// Durable storage failure. Never retried; propagates to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures of log tree mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogTreeError {
    #[error("log {id:?} not found")]
    NotFound { id: String },

    /// Moving `id` under `target` would make it its own ancestor
    #[error("cannot move log {id:?} under {target:?}: target is the log itself or one of its descendants")]
    Cycle { id: String, target: String },
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Tree(#[from] LogTreeError),

    #[error("{kind} {id:?} not found")]
    NotFound { kind: &'static str, id: String },
}

impl DbError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Tree(LogTreeError::NotFound { .. })
        )
    }
}

pub type DbResult<T> = Result<T, DbError>;
