//! Human-readable text report of a saved profile.

use super::schema::ProfileNode;
use crate::utils::config::ROOT_SEGMENT;

/// Render `root` as an indented tree, hottest regions first.
///
/// `max_depth` limits how many levels below the root are shown; deeper
/// regions are summarized by a count.
pub fn format_report(root: &ProfileNode, unit: &str, max_depth: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "  {:<40} {:>8} {:>12} {:>12} {:>12} {:>12} {:>8}",
        "Region", "Visits", "Total", "Avg", "Min", "Max", "%Parent"
    ));
    lines.push(format!("  {}", "-".repeat(110)));

    push_node(&mut lines, ROOT_SEGMENT, root, 0, max_depth);

    lines.push(String::new());
    lines.push(format!("  {} regions, times in {}", root.node_count(), unit));

    lines.join("\n")
}

fn push_node(
    lines: &mut Vec<String>,
    name: &str,
    node: &ProfileNode,
    depth: usize,
    max_depth: usize,
) {
    let label = format!("{}{}", "  ".repeat(depth), name);
    let width = label.chars().count();
    let label = if width > 40 {
        format!("...{}", label.chars().skip(width - 37).collect::<String>())
    } else {
        label
    };

    let percent = node
        .percent_of_parent
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| "-".to_string());

    lines.push(format!(
        "  {:<40} {:>8} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>8}",
        label, node.visit_count, node.total_time, node.avg_time, node.min_time, node.max_time, percent
    ));

    if node.children.is_empty() {
        return;
    }
    if depth >= max_depth {
        lines.push(format!(
            "  {}({} nested region(s) hidden)",
            "  ".repeat(depth + 1),
            node.node_count() - 1
        ));
        return;
    }

    for (child_name, child) in node.hottest_children() {
        push_node(lines, child_name, child, depth + 1, max_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn node(total: f64, percent: Option<f64>) -> ProfileNode {
        ProfileNode {
            visit_count: 1,
            total_time: total,
            percent_of_parent: percent,
            percent_of_root: None,
            max_time: total,
            min_time: total,
            avg_time: total,
            children: BTreeMap::new(),
        }
    }

    #[test]
    fn test_report_lists_hottest_first() {
        let mut root = node(10.0, None);
        root.children.insert("cold".to_string(), node(1.0, Some(10.0)));
        root.children.insert("hot".to_string(), node(8.0, Some(80.0)));

        let report = format_report(&root, "ms", 4);
        let hot = report.find("hot").unwrap();
        let cold = report.find("cold").unwrap();
        assert!(hot < cold);
        assert!(report.contains("80.0%"));
        assert!(report.contains("3 regions, times in ms"));
    }

    #[test]
    fn test_report_depth_limit() {
        let mut root = node(10.0, None);
        let mut a = node(5.0, Some(50.0));
        a.children.insert("b".to_string(), node(1.0, Some(20.0)));
        root.children.insert("a".to_string(), a);

        let report = format_report(&root, "ms", 0);
        assert!(!report.lines().any(|l| l.trim_start().starts_with("a ")));
        assert!(report.contains("2 nested region(s) hidden"));
    }
}
