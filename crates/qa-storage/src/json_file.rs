//! Versioned JSON collection files with atomic replacement

use fs2::FileExt;
use qa_core::error::{QaError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// On-disk envelope for a collection of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionFile<T> {
    /// Schema version for compatibility checks
    pub schema_version: String,
    /// The records
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

/// Borrowed view written back to disk
#[derive(Serialize)]
struct CollectionRef<'a, T> {
    schema_version: &'a str,
    records: &'a [T],
}

impl<T> CollectionFile<T> {
    /// Reject files written by an incompatible major version
    fn check_version(&self, path: &Path) -> Result<()> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        if major(&self.schema_version) != major(CURRENT_SCHEMA_VERSION) {
            return Err(QaError::Storage(format!(
                "Unsupported schema version {} in {:?} (expected {})",
                self.schema_version, path, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}

/// Read all records from `path`; a missing file is an empty collection
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(QaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open {:?}: {}", path, e),
            )))
        }
    };

    let collection: CollectionFile<T> = serde_json::from_reader(BufReader::new(file))?;
    collection.check_version(path)?;
    Ok(collection.records)
}

/// Hidden sibling of `path` with the given suffix
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("collection.json");
    path.with_file_name(format!(".{}.{}", name, suffix))
}

/// Lock file guarding a collection
pub fn lock_path(path: &Path) -> PathBuf {
    sibling(path, "lock")
}

/// Temporary sibling for one atomic write, unique per call
pub fn temp_path(path: &Path) -> PathBuf {
    sibling(path, &format!("{}.tmp", uuid::Uuid::new_v4()))
}

/// OS advisory lock on a collection file, released on drop.
///
/// The lock lives on a separate `.lock` sibling because the collection
/// itself is replaced by rename on every write. Every handle and every
/// process opening the same collection contends on it.
#[derive(Debug)]
pub struct CollectionLock {
    file: fs::File,
}

impl CollectionLock {
    /// Block until no other holder reads or writes `path`
    pub fn exclusive(path: &Path) -> Result<Self> {
        let file = open_lock_file(path)?;
        FileExt::lock_exclusive(&file).map_err(|e| lock_error(path, e))?;
        Ok(Self { file })
    }

    /// Block until no other holder writes `path`
    pub fn shared(path: &Path) -> Result<Self> {
        let file = open_lock_file(path)?;
        FileExt::lock_shared(&file).map_err(|e| lock_error(path, e))?;
        Ok(Self { file })
    }
}

impl Drop for CollectionLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn open_lock_file(path: &Path) -> Result<fs::File> {
    let lock_path = lock_path(path);
    fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| lock_error(&lock_path, e))
}

fn lock_error(path: &Path, e: std::io::Error) -> QaError {
    QaError::Io(std::io::Error::new(
        e.kind(),
        format!("Failed to lock {:?}: {}", path, e),
    ))
}

/// Write records atomically (write to temp, then rename).
///
/// Callers that read, modify, and write back must hold an exclusive
/// [`CollectionLock`] across the whole cycle.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let temp_path = temp_path(path);

    let temp_file = fs::File::create(&temp_path).map_err(|e| {
        QaError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create temp file: {}", e),
        ))
    })?;
    let mut writer = BufWriter::new(temp_file);
    serde_json::to_writer_pretty(
        &mut writer,
        &CollectionRef {
            schema_version: CURRENT_SCHEMA_VERSION,
            records,
        },
    )?;
    writer.flush()?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        QaError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to rename temp file: {}", e),
        ))
    })?;

    debug!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}
