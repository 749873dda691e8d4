//! Persistence of exported profiles.
//!
//! This module handles:
//! - Naming saved profiles after the run's log file
//! - Destinations that only publish complete documents
//! - Writing and reading JSON profiles

pub mod destination;
pub mod json;
pub mod naming;

// Re-export main functions
pub use destination::{Destination, DirectoryDestination, PendingFile};
pub use json::{read_profile, save_profile, validate_path, write_profile};
pub use naming::{profile_file_name, FixedName, LogFileNaming, OutputNaming};
