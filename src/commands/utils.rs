use crate::export::format_report;
use crate::output::read_profile;
use crate::utils::config::{PROFILE_SUFFIX, SEPARATOR};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a profile JSON file and print its report
///
/// Saved documents do not record their time unit; `unit` only labels the output.
pub fn validate_profile_file(file_path: PathBuf, depth: usize, unit: &str) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(&file_path)
        .with_context(|| format!("Failed to read profile {}", file_path.display()))?;

    println!("✓ Valid profile JSON");
    println!("  Root Visits: {}", profile.visit_count);
    println!("  Total Time:  {:.3} {}", profile.total_time, unit);
    println!("  Avg Tick:    {:.3} {}", profile.avg_time, unit);
    println!("  Regions:     {}", profile.node_count());
    println!("  Max Depth:   {}", profile.max_depth());
    println!();
    println!("{}", format_report(&profile, unit, depth));

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Tick Profiler Document Schema");
    println!("Files: <base name>{}", PROFILE_SUFFIX);
    println!();

    if show_details {
        println!("Schema Structure (one object per region, rooted at \"root\"):");
        println!("  visitCount: number       - Completed push/pop cycles");
        println!("  totalTime: number        - Accumulated time across all visits");
        println!("  percentOfParent: number? - Share of the parent's total (absent at root)");
        println!("  percentOfRoot: number?   - Share of the root's total");
        println!("  maxTime: number          - Longest single visit");
        println!("  minTime: number          - Shortest single visit");
        println!("  avgTime: number          - totalTime / visitCount");
        println!("  children: object         - Nested regions keyed by segment name");
        println!();
        println!(
            "Segment names may not contain U+{:04X} (path key separator).",
            SEPARATOR as u32
        );
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Tick Profiler v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Hierarchical per-tick execution time profiler with JSON tree export.");
}
