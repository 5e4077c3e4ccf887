//! Log tree engine
//!
//! Pure functions over the flat log collection: nesting it into a forest,
//! collecting descendants for cascading deletes, and reparenting.
//! A log's `parent_id` is global (not scoped to its site); an empty
//! `parent_id` marks a root.

use crate::error::LogTreeError;
use searchlog_types::{LogEntry, LogTreeNode};
use std::collections::{HashMap, HashSet, VecDeque};

/// Site name shown for logs whose site no longer exists
pub const UNKNOWN_SITE: &str = "unknown";

/// Children of each parent id, in collection order, keyed by the raw
/// `parent_id`.
struct ChildIndex<'a> {
    logs: &'a [LogEntry],
    children: HashMap<&'a str, Vec<usize>>,
}

impl<'a> ChildIndex<'a> {
    fn new(logs: &'a [LogEntry]) -> Self {
        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, log) in logs.iter().enumerate() {
            children.entry(log.parent_id.as_str()).or_default().push(i);
        }
        Self { logs, children }
    }

    /// Top-level logs: empty `parent_id`, a parent that matches no log,
    /// or a log that is its own parent
    fn roots(&self) -> Vec<usize> {
        let ids: HashSet<&str> = self.logs.iter().map(|l| l.id.as_str()).collect();
        self.logs
            .iter()
            .enumerate()
            .filter(|(_, l)| {
                l.is_root() || l.parent_id == l.id || !ids.contains(l.parent_id.as_str())
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn node(&self, i: usize, placed: &mut [bool]) -> LogTreeNode {
        placed[i] = true;
        let log = &self.logs[i];
        LogTreeNode {
            log: log.clone(),
            site_name: None,
            children: self.nodes_under(&log.id, placed),
        }
    }

    fn nodes_under(&self, parent_id: &str, placed: &mut [bool]) -> Vec<LogTreeNode> {
        let Some(indices) = self.children.get(parent_id) else {
            return Vec::new();
        };
        self.nodes_at(indices, placed)
    }

    fn nodes_at(&self, indices: &[usize], placed: &mut [bool]) -> Vec<LogTreeNode> {
        let mut nodes = Vec::with_capacity(indices.len());
        for &i in indices {
            if !placed[i] {
                nodes.push(self.node(i, placed));
            }
        }
        nodes
    }

    /// The whole forest. Logs stranded in a parent cycle, which no root
    /// can reach, are appended as extra roots.
    fn forest(&self) -> Vec<LogTreeNode> {
        let mut placed = vec![false; self.logs.len()];
        let mut nodes = self.nodes_at(&self.roots(), &mut placed);
        for i in 0..self.logs.len() {
            if !placed[i] {
                nodes.push(self.node(i, &mut placed));
            }
        }
        nodes
    }
}

/// Nest `logs` under `parent_id`.
///
/// With `""` this is the whole forest: every log is placed exactly once and
/// logs whose parent matches no log render as roots. Otherwise it is the
/// logs whose `parent_id` equals `parent_id`, whether or not such a log
/// exists, each with its subtree. Order among siblings follows the input.
pub fn build_tree(logs: &[LogEntry], parent_id: &str) -> Vec<LogTreeNode> {
    let index = ChildIndex::new(logs);
    if parent_id.is_empty() {
        return index.forest();
    }
    let mut placed = vec![false; logs.len()];
    index.nodes_under(parent_id, &mut placed)
}

/// Forest filtered to one site: that site's logs with an empty
/// `parent_id`, each with its full subtree (descendants are included
/// whatever their own site).
pub fn site_tree(logs: &[LogEntry], site_id: &str) -> Vec<LogTreeNode> {
    build_tree(logs, "")
        .into_iter()
        .filter(|node| node.log.site_id == site_id && node.log.is_root())
        .collect()
}

/// Fill in `site_name` across a forest, falling back to [`UNKNOWN_SITE`]
pub fn annotate_site_names(nodes: &mut [LogTreeNode], site_names: &HashMap<String, String>) {
    for node in nodes {
        node.site_name = Some(
            site_names
                .get(&node.log.site_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_SITE.to_string()),
        );
        annotate_site_names(&mut node.children, site_names);
    }
}

/// Ids of every log below `node_id`, excluding `node_id` itself
pub fn descendant_ids(logs: &[LogEntry], node_id: &str) -> HashSet<String> {
    let mut by_parent: HashMap<&str, Vec<&str>> = HashMap::new();
    for log in logs {
        by_parent
            .entry(log.parent_id.as_str())
            .or_default()
            .push(log.id.as_str());
    }

    let mut found = HashSet::new();
    let mut queue = VecDeque::from([node_id]);
    while let Some(current) = queue.pop_front() {
        for &child in by_parent.get(current).into_iter().flatten() {
            if child != node_id && found.insert(child.to_string()) {
                queue.push_back(child);
            }
        }
    }
    found
}

/// Result of a removal: the surviving logs and the removed ids in
/// collection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub remaining: Vec<LogEntry>,
    pub removed: Vec<String>,
}

fn remove_ids(logs: &[LogEntry], targets: &HashSet<String>) -> Removal {
    let (removed, remaining): (Vec<LogEntry>, Vec<LogEntry>) =
        logs.iter().cloned().partition(|l| targets.contains(&l.id));
    Removal {
        remaining,
        removed: removed.into_iter().map(|l| l.id).collect(),
    }
}

/// Remove `node_id` and all its descendants. An absent id removes nothing.
pub fn delete_subtree(logs: &[LogEntry], node_id: &str) -> Removal {
    if !logs.iter().any(|l| l.id == node_id) {
        return Removal {
            remaining: logs.to_vec(),
            removed: Vec::new(),
        };
    }

    let mut targets = descendant_ids(logs, node_id);
    targets.insert(node_id.to_string());
    remove_ids(logs, &targets)
}

/// Remove every log of `site_id` together with its descendants.
///
/// Subtrees hanging off the site's root logs go first; any same-site log
/// not reached that way (its ancestor belongs to another site) is then
/// removed with its own subtree, so no removed log leaves children behind.
pub fn delete_by_site(logs: &[LogEntry], site_id: &str) -> Removal {
    let mut targets = HashSet::new();

    for root in logs.iter().filter(|l| l.site_id == site_id && l.is_root()) {
        targets.insert(root.id.clone());
        targets.extend(descendant_ids(logs, &root.id));
    }
    for log in logs.iter().filter(|l| l.site_id == site_id) {
        if targets.insert(log.id.clone()) {
            targets.extend(descendant_ids(logs, &log.id));
        }
    }

    remove_ids(logs, &targets)
}

/// Reparent `dragged_id` under `new_parent` (`None` moves it to the root)
/// and relocate it to the end of the collection, so it renders last among
/// its new siblings.
///
/// Fails without changing anything when the log does not exist or when
/// `new_parent` is the log itself or one of its descendants. A
/// `new_parent` that matches no log is accepted; the log then renders as a
/// root.
pub fn move_log(
    logs: &[LogEntry],
    dragged_id: &str,
    new_parent: Option<&str>,
) -> Result<Vec<LogEntry>, LogTreeError> {
    let position = logs
        .iter()
        .position(|l| l.id == dragged_id)
        .ok_or_else(|| LogTreeError::NotFound {
            id: dragged_id.to_string(),
        })?;

    let new_parent = new_parent.filter(|p| !p.is_empty());
    if let Some(target) = new_parent {
        if target == dragged_id || descendant_ids(logs, dragged_id).contains(target) {
            return Err(LogTreeError::Cycle {
                id: dragged_id.to_string(),
                target: target.to_string(),
            });
        }
    }

    let mut moved = logs.to_vec();
    let mut dragged = moved.remove(position);
    dragged.parent_id = new_parent.unwrap_or("").to_string();
    moved.push(dragged);
    Ok(moved)
}
