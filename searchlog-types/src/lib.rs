//! Shared types for the searchlog backend and its HTTP clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Entities
// =====================================================

/// A named external target the user tracks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// One hierarchical search/investigation step.
///
/// `parent_id` is empty for a root log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub site_id: String,
    pub word: String,
    pub url: String,
    pub result: String,
    pub extra1: String,
    pub extra2: String,
    pub parent_id: String,
}

impl LogEntry {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }
}

/// Unstructured scratch note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: String,
    pub site_id: String,
    pub word: String,
    pub description: String,
}

/// Free-form Markdown document. `content` is the Markdown source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub content: String,
}

// =====================================================
// Views
// =====================================================

/// A log with its nested children, as rendered in the log listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTreeNode {
    #[serde(flatten)]
    pub log: LogEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    pub children: Vec<LogTreeNode>,
}

impl LogTreeNode {
    /// Total number of logs in this node's subtree, itself included
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(LogTreeNode::len).sum::<usize>()
    }
}

/// A single log together with the name of the site it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogDetail {
    pub log: LogEntry,
    pub site_name: String,
}

/// A memo annotated with its site name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoView {
    #[serde(flatten)]
    pub memo: Memo,
    pub site_name: String,
}

/// Prefilled log creation form produced from a memo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDraft {
    pub site_id: String,
    pub word: String,
    pub result: String,
}

// =====================================================
// Request Types
// =====================================================
//
// Every field defaults to empty: missing input is stored as an empty
// string rather than rejected.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInput {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogInput {
    pub site_id: String,
    pub word: String,
    pub url: String,
    pub result: String,
    pub extra1: String,
    pub extra2: String,
    /// Empty creates a root log
    pub parent_id: String,
}

/// Editable log fields. Site and parent are changed only through a move.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogUpdate {
    pub word: String,
    pub url: String,
    pub result: String,
    pub extra1: String,
    pub extra2: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoInput {
    pub site_id: String,
    pub word: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordInput {
    pub title: String,
    pub content: String,
}

/// Drag-and-drop reparenting of a log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveLogRequest {
    #[serde(default)]
    pub log_id: String,
    /// `None` or empty moves the log to the root
    #[serde(default)]
    pub target_id: Option<String>,
}

impl MoveLogRequest {
    /// The new parent, with `""` normalised to `None`
    pub fn target(&self) -> Option<&str> {
        self.target_id.as_deref().filter(|t| !t.is_empty())
    }
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

impl ApiResponse<()> {
    /// Success with no payload
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

/// Id of a freshly created entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: String,
}

/// Ids removed by a (possibly cascading) delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedIds {
    pub deleted: Vec<String>,
}
