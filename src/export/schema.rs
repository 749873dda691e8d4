//! Read-back schema for saved profile documents.
//!
//! Mirrors the shape written by `serialize`, with times already divided into
//! output units.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One region of a saved profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileNode {
    /// Completed visits
    pub visit_count: u64,

    /// Accumulated time across all visits
    pub total_time: f64,

    /// Share of the immediate parent's total (absent at root or zero parent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_of_parent: Option<f64>,

    /// Share of the root's total (absent when the root total is zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_of_root: Option<f64>,

    pub max_time: f64,
    pub min_time: f64,
    pub avg_time: f64,

    #[serde(default)]
    pub children: BTreeMap<String, ProfileNode>,
}

impl ProfileNode {
    /// Number of regions in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(ProfileNode::node_count).sum::<usize>()
    }

    /// Deepest nesting level below this node (0 for a leaf)
    pub fn max_depth(&self) -> usize {
        self.children
            .values()
            .map(|child| child.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Children sorted by total time, hottest first
    pub fn hottest_children(&self) -> Vec<(&str, &ProfileNode)> {
        let mut children: Vec<(&str, &ProfileNode)> = self
            .children
            .iter()
            .map(|(name, node)| (name.as_str(), node))
            .collect();
        children.sort_by(|a, b| b.1.total_time.total_cmp(&a.1.total_time).then(a.0.cmp(b.0)));
        children
    }
}
