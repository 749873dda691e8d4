//! Destinations that persist a named profile document.

use crate::utils::error::OutputError;
use log::debug;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Somewhere a document can be written by name.
///
/// Nothing is guaranteed to be visible under `name` until `close` succeeds.
pub trait Destination {
    type Writer: Write;

    fn open(&self, name: &str) -> Result<Self::Writer, OutputError>;
    fn close(&self, writer: Self::Writer) -> Result<(), OutputError>;
}

/// Files in a directory.
///
/// Writes go to a temporary file next to the target and are renamed into
/// place on `close`; a writer dropped before `close` leaves no file behind.
#[derive(Debug, Clone)]
pub struct DirectoryDestination {
    dir: PathBuf,
}

/// An open, not yet persisted file
pub struct PendingFile {
    file: BufWriter<NamedTempFile>,
    target: PathBuf,
}

impl PendingFile {
    /// Where the file lands on `close`
    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl Write for PendingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl DirectoryDestination {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a document named `name` ends up at
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Names must be a single, non-empty file name
fn validate_name(name: &str) -> Result<(), OutputError> {
    if name.is_empty() {
        return Err(OutputError::InvalidPath("Name is empty".to_string()));
    }
    if name.contains(|c: char| c == '/' || c == '\\') || name == "." || name == ".." {
        return Err(OutputError::InvalidPath(format!(
            "Name is not a plain file name: {}",
            name
        )));
    }
    Ok(())
}

impl Destination for DirectoryDestination {
    type Writer = PendingFile;

    fn open(&self, name: &str) -> Result<PendingFile, OutputError> {
        validate_name(name)?;

        if !self.dir.exists() {
            debug!("Creating output directory: {}", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    self.dir.display(),
                    e
                ))
            })?;
        }

        let temp = NamedTempFile::new_in(&self.dir)?;
        debug!("Staging {} in {}", name, temp.path().display());

        Ok(PendingFile {
            file: BufWriter::new(temp),
            target: self.path_for(name),
        })
    }

    fn close(&self, writer: PendingFile) -> Result<(), OutputError> {
        debug!("Persisting {}", writer.target().display());
        let PendingFile { file, target } = writer;
        let temp = file.into_inner().map_err(|e| e.into_error())?;
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| e.error)?;

        debug!("Persisted {}", target.display());
        Ok(())
    }
}
