//! JSON profile output writer.
//!
//! Writes exported profile documents to disk and reads them back.

use super::destination::Destination;
use super::naming::{profile_file_name, OutputNaming};
use crate::export::{export_profile, ProfileDocument, ProfileNode};
use crate::recorder::{Clock, TickRecorder};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export the recorder's statistics and persist them through `destination`
///
/// **Public** - main entry point for saving a profile
///
/// # Arguments
/// * `recorder` - Recorder whose statistics are snapshotted
/// * `naming` - Supplies the base name of the output
/// * `destination` - Where the named document is written
///
/// # Returns
/// The name the profile was saved under
///
/// # Errors
/// * `OutputError::Export` - the statistics table could not be turned into a tree
/// * `OutputError::NoDestination` - `naming` has no base name
/// * `OutputError::WriteFailed` - I/O error while writing
///
/// # Example
/// ```ignore
/// let destination = DirectoryDestination::new("profiles");
/// let name = save_profile(&recorder, &LogFileNaming::started_at(chrono::Local::now()), &destination)?;
/// ```
pub fn save_profile<C, D>(
    recorder: &TickRecorder<C>,
    naming: &dyn OutputNaming,
    destination: &D,
) -> Result<String, OutputError>
where
    C: Clock,
    D: Destination,
{
    if recorder.is_tick_active() {
        debug!("Saving profile while a tick is active, in-flight frames are not included");
    }

    // Export first: the document must be valid even when there is nowhere to put it.
    let snapshot = recorder.snapshot();
    let document = export_profile(&snapshot, recorder.time_divisor())?;

    let name = profile_file_name(naming).ok_or(OutputError::NoDestination)?;
    info!("Saving profile ({} regions) as: {}", snapshot.len(), name);

    let mut writer = destination.open(&name)?;
    document.write_json(&mut writer)?;
    writer.flush()?;
    destination.close(writer)?;

    info!("Profile saved successfully");

    Ok(name)
}

/// Write a profile document to a JSON file
///
/// **Public** - direct path output, bypassing naming and destinations
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::Export` - serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_profile(document: &ProfileDocument, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing profile to: {}", output_path.display());

    // Validate path
    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    document.write_json(&mut writer)?;
    writer.flush()?;

    info!(
        "Profile written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Validate that output path is writable
///
/// **Public** - shared by direct writes and the CLI
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a saved profile from a JSON file
///
/// **Public** - used by validation and the text report
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<ProfileNode, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let profile: ProfileNode =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Profile loaded: {} regions, root total {}",
        profile.node_count(),
        profile.total_time
    );

    Ok(profile)
}
