//! Percentage-annotated JSON serialization of the export tree.
//!
//! Nodes are streamed straight into the serializer through borrowed views,
//! so each percentage is computed once and no intermediate JSON value is
//! built. Output shape per node:
//!
//! ```json
//! {
//!   "visitCount": 2,
//!   "totalTime": 0.02,
//!   "percentOfParent": 40.0,
//!   "percentOfRoot": 20.0,
//!   "maxTime": 0.01,
//!   "minTime": 0.01,
//!   "avgTime": 0.01,
//!   "children": { "...": { } }
//! }
//! ```

use super::tree::{build_tree, ExportNode};
use crate::recorder::LocatedStats;
use crate::utils::config::ROOT_SEGMENT;
use crate::utils::error::ExportError;
use log::debug;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::io::Write;

/// An exported tree plus the divisor its raw times are converted with
#[derive(Debug, Clone)]
pub struct ProfileDocument {
    pub root: ExportNode,
    pub time_divisor: f64,
}

/// Rebuild the tree from a snapshot and wrap it for serialization
pub fn export_profile(
    snapshot: &HashMap<String, LocatedStats>,
    time_divisor: f64,
) -> Result<ProfileDocument, ExportError> {
    let root = build_tree(snapshot)?;
    Ok(ProfileDocument { root, time_divisor })
}

impl ProfileDocument {
    /// Serialize as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize as pretty-printed JSON into `writer`
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(writer, self)?;
        debug!("Serialized profile with {} nodes", self.root.node_count());
        Ok(())
    }
}

impl Serialize for ProfileDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeView {
            name: ROOT_SEGMENT,
            node: &self.root,
            time_divisor: self.time_divisor,
            parent_total: None,
            root_total: self.root.total_time,
        }
        .serialize(serializer)
    }
}

/// A node plus the context its percentages are computed against
struct NodeView<'a> {
    name: &'a str,
    node: &'a ExportNode,
    time_divisor: f64,
    /// Immediate parent's total, `None` at the root
    parent_total: Option<i64>,
    /// Export root's total, fixed for the whole traversal
    root_total: i64,
}

/// Share of `total` in `denominator`, `None` when the denominator is zero
fn percent(total: i64, denominator: i64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(total as f64 / denominator as f64 * 100.0)
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.node;
        let divisor = self.time_divisor;
        let avg_time = node.average_time(divisor).ok_or_else(|| {
            S::Error::custom(format!("region {:?} has a visit count of zero", self.name))
        })?;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("visitCount", &node.visit_count)?;
        map.serialize_entry("totalTime", &(node.total_time as f64 / divisor))?;
        if let Some(p) = self.parent_total.and_then(|parent| percent(node.total_time, parent)) {
            map.serialize_entry("percentOfParent", &p)?;
        }
        if let Some(p) = percent(node.total_time, self.root_total) {
            map.serialize_entry("percentOfRoot", &p)?;
        }
        map.serialize_entry("maxTime", &(node.max_time as f64 / divisor))?;
        map.serialize_entry("minTime", &(node.min_time as f64 / divisor))?;
        map.serialize_entry("avgTime", &avg_time)?;
        map.serialize_entry("children", &ChildrenView(self))?;
        map.end()
    }
}

/// The `children` object of a node
struct ChildrenView<'a, 'b>(&'b NodeView<'a>);

impl Serialize for ChildrenView<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let parent = self.0;
        let mut map = serializer.serialize_map(Some(parent.node.children.len()))?;
        for (name, child) in &parent.node.children {
            let view = NodeView {
                name: name.as_str(),
                node: child,
                time_divisor: parent.time_divisor,
                parent_total: Some(parent.node.total_time),
                root_total: parent.root_total,
            };
            map.serialize_entry(name, &view)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::path::from_segments;
    use serde_json::Value;

    fn stats(visits: u64, total: i64, max: i64, min: i64) -> LocatedStats {
        LocatedStats {
            visit_count: visits,
            total_time: total,
            max_time: max,
            min_time: min,
        }
    }

    fn render(table: &HashMap<String, LocatedStats>, divisor: f64) -> Value {
        let document = export_profile(table, divisor).unwrap();
        serde_json::from_str(&document.to_json_string().unwrap()).unwrap()
    }

    #[test]
    fn test_field_order() {
        let mut table = HashMap::new();
        table.insert("root".to_string(), stats(1, 10, 10, 10));
        table.insert(from_segments(&["root", "a"]), stats(1, 5, 5, 5));

        let json = export_profile(&table, 1.0).unwrap().to_json_string().unwrap();
        let child = &json[json.find("\"a\"").unwrap()..];
        let fields = [
            "visitCount",
            "totalTime",
            "percentOfParent",
            "percentOfRoot",
            "maxTime",
            "minTime",
            "avgTime",
            "children",
        ];
        let positions: Vec<usize> = fields.iter().map(|f| child.find(f).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_root_has_no_percent_of_parent() {
        let mut table = HashMap::new();
        table.insert("root".to_string(), stats(2, 50, 30, 20));

        let root = render(&table, 10.0);
        assert!(root.get("percentOfParent").is_none());
        assert_eq!(root["percentOfRoot"], 100.0);
        assert_eq!(root["totalTime"], 5.0);
        assert_eq!(root["maxTime"], 3.0);
        assert_eq!(root["minTime"], 2.0);
        assert_eq!(root["avgTime"], 2.5);
    }

    #[test]
    fn test_percent_of_parent_uses_immediate_parent() {
        let mut table = HashMap::new();
        table.insert("root".to_string(), stats(1, 200, 200, 200));
        table.insert(from_segments(&["root", "a"]), stats(1, 100, 100, 100));
        table.insert(from_segments(&["root", "a", "b"]), stats(1, 25, 25, 25));

        let root = render(&table, 1.0);
        let b = &root["children"]["a"]["children"]["b"];
        assert_eq!(b["percentOfParent"], 25.0);
        assert_eq!(b["percentOfRoot"], 12.5);
    }

    #[test]
    fn test_zero_totals_omit_percentages() {
        let mut table = HashMap::new();
        table.insert("root".to_string(), stats(1, 0, 0, 0));
        table.insert(from_segments(&["root", "a"]), stats(1, 0, 0, 0));

        let root = render(&table, 1.0);
        assert!(root.get("percentOfRoot").is_none());
        let a = &root["children"]["a"];
        assert!(a.get("percentOfParent").is_none());
        assert!(a.get("percentOfRoot").is_none());
    }

    #[test]
    fn test_zero_visit_node_fails_serialization() {
        let document = ProfileDocument {
            root: ExportNode {
                visit_count: 0,
                total_time: 0,
                max_time: 0,
                min_time: 0,
                children: Default::default(),
            },
            time_divisor: 1.0,
        };
        assert!(matches!(
            document.to_json_string(),
            Err(ExportError::Serialization(_))
        ));
    }
}
