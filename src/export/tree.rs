//! Rebuild the region tree from the flat statistics table.
//!
//! The recorder keeps no parent pointers: each record is keyed by its full
//! path, and the parent of `root␞a␞b` is simply `root␞a`.
//!
//! # Algorithm
//! 1. Copy every record into a childless node
//! 2. Link nodes deepest first, moving each one into its parent's children
//! 3. What remains under the key `root` is the export root

use crate::recorder::path;
use crate::recorder::LocatedStats;
use crate::utils::config::ROOT_SEGMENT;
use crate::utils::error::ExportError;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// One region in the exported tree.
///
/// Children are ordered by name so the same table always serializes to the
/// same bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNode {
    pub visit_count: u64,
    pub total_time: i64,
    pub max_time: i64,
    pub min_time: i64,
    pub children: BTreeMap<String, ExportNode>,
}

impl ExportNode {
    fn from_stats(stats: &LocatedStats) -> Self {
        Self {
            visit_count: stats.visit_count,
            total_time: stats.total_time,
            max_time: stats.max_time,
            min_time: stats.min_time,
            children: BTreeMap::new(),
        }
    }

    /// Immediate child named `name`
    pub fn child(&self, name: &str) -> Option<&ExportNode> {
        self.children.get(name)
    }

    /// Descendant reached by following `segments` from this node
    pub fn find(&self, segments: &[&str]) -> Option<&ExportNode> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Mean visit time in output units, `None` if never visited
    pub fn average_time(&self, time_divisor: f64) -> Option<f64> {
        if self.visit_count == 0 {
            return None;
        }
        Some(self.total_time as f64 / time_divisor / self.visit_count as f64)
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(ExportNode::node_count).sum::<usize>()
    }
}

/// Build the export tree from a snapshot of the statistics table
///
/// # Errors
/// * `ExportError::DivideByZero` - a record was never visited
/// * `ExportError::MissingParent` - a record's parent key has no record
/// * `ExportError::MissingRoot` - no `root` record, no tick has completed
pub fn build_tree(snapshot: &HashMap<String, LocatedStats>) -> Result<ExportNode, ExportError> {
    debug!("Building export tree from {} records", snapshot.len());

    let mut nodes: HashMap<&str, ExportNode> = HashMap::with_capacity(snapshot.len());
    for (key, stats) in snapshot {
        if stats.visit_count == 0 {
            return Err(ExportError::DivideByZero {
                path: path::display(key),
            });
        }
        nodes.insert(key.as_str(), ExportNode::from_stats(stats));
    }

    // Deepest first: by the time a node is linked, all of its own children
    // have already been moved into it.
    let mut linking: Vec<&str> = snapshot
        .keys()
        .map(String::as_str)
        .filter(|key| path::depth(key) >= 2)
        .collect();
    linking.sort_by_key(|key| std::cmp::Reverse(path::depth(key)));

    for key in linking {
        let Some((parent_key, leaf)) = path::parent_and_leaf(key) else {
            continue;
        };
        if !nodes.contains_key(parent_key) {
            return Err(ExportError::MissingParent {
                path: path::display(key),
                parent: path::display(parent_key),
            });
        }

        let Some(node) = nodes.remove(key) else {
            continue;
        };
        if let Some(parent) = nodes.get_mut(parent_key) {
            parent.children.insert(leaf.to_string(), node);
        }
    }

    let root = nodes.remove(ROOT_SEGMENT).ok_or(ExportError::MissingRoot)?;
    debug!("Export tree has {} nodes", root.node_count());

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::path::from_segments;

    fn stats(visits: u64, total: i64) -> LocatedStats {
        LocatedStats {
            visit_count: visits,
            total_time: total,
            max_time: total,
            min_time: total,
        }
    }

    #[test]
    fn test_build_nested_tree() {
        let mut table = HashMap::new();
        table.insert("root".to_string(), stats(1, 100));
        table.insert(from_segments(&["root", "a"]), stats(1, 60));
        table.insert(from_segments(&["root", "a", "b"]), stats(2, 40));
        table.insert(from_segments(&["root", "c"]), stats(1, 30));

        let root = build_tree(&table).unwrap();

        assert_eq!(root.total_time, 100);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.find(&["a", "b"]).unwrap().visit_count, 2);
        assert_eq!(root.child("c").unwrap().total_time, 30);
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_missing_root() {
        let table = HashMap::new();
        assert!(matches!(build_tree(&table), Err(ExportError::MissingRoot)));
    }

    #[test]
    fn test_missing_parent() {
        let mut table = HashMap::new();
        table.insert("root".to_string(), stats(1, 100));
        table.insert(from_segments(&["root", "a", "b"]), stats(1, 40));

        let result = build_tree(&table);
        assert!(matches!(result, Err(ExportError::MissingParent { .. })));
    }

    #[test]
    fn test_zero_visits_rejected() {
        let mut table = HashMap::new();
        table.insert("root".to_string(), LocatedStats::default());

        assert!(matches!(
            build_tree(&table),
            Err(ExportError::DivideByZero { .. })
        ));
    }

    #[test]
    fn test_average_time() {
        let node = ExportNode::from_stats(&stats(4, 2000));
        assert_eq!(node.average_time(1000.0), Some(0.5));
    }
}
