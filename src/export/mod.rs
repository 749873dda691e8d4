//! Export of accumulated statistics into a nested, annotated document.
//!
//! This module turns the recorder's flat table into:
//! - A region tree rebuilt from path keys
//! - A percentage-annotated JSON document
//! - A text report for saved documents

pub mod report;
pub mod schema;
pub mod serialize;
pub mod tree;

// Re-export main types and functions
pub use report::format_report;
pub use schema::ProfileNode;
pub use serialize::{export_profile, ProfileDocument};
pub use tree::{build_tree, ExportNode};
