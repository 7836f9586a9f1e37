//! File-based storage for drafts and submitted briefs
//!
//! All state lives under a single data directory as pretty-printed JSON:
//! `drafts/{id}.json` and `briefs/{id}.json`, plus an `index.json` per
//! subdirectory for listing without opening every file. Writes go through
//! a temp file and rename so a crash never leaves a half-written entity
//! behind.

pub mod briefs;
pub mod drafts;
pub mod index;

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Result type for file storage operations
pub type FileResult<T> = Result<T, String>;

/// Subdirectory holding draft files
pub const DRAFTS_DIR: &str = "drafts";

/// Subdirectory holding submitted brief files
pub const BRIEFS_DIR: &str = "briefs";

/// Lock file guarding the data directory against a second server instance
const LOCK_FILE: &str = ".lock";

/// Default data directory (platform data dir + `procloud-briefs`)
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("procloud-briefs")
}

/// Ensure a directory exists, creating it and its parents if needed
pub fn ensure_dir(path: &Path) -> FileResult<()> {
    fs::create_dir_all(path).map_err(|e| format!("Failed to create directory {:?}: {}", path, e))
}

/// Write content to a file atomically (write to temp file, then rename)
pub fn atomic_write(path: &Path, content: &str) -> FileResult<()> {
    let temp_path = path.with_extension("tmp");

    fs::write(&temp_path, content)
        .map_err(|e| format!("Failed to write {:?}: {}", temp_path, e))?;

    fs::rename(&temp_path, path)
        .map_err(|e| format!("Failed to rename {:?} to {:?}: {}", temp_path, path, e))
}

/// Read and deserialize a JSON file
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> FileResult<T> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {:?}: {}", path, e))?;

    serde_json::from_str(&content).map_err(|e| format!("Failed to parse {:?}: {}", path, e))
}

/// Serialize and write a JSON file atomically
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> FileResult<()> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize {:?}: {}", path, e))?;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    atomic_write(path, &content)
}

/// Create the data directory layout (drafts/ and briefs/ subdirectories)
pub fn init_data_dir(data_dir: &Path) -> FileResult<()> {
    ensure_dir(data_dir)?;
    ensure_dir(&data_dir.join(DRAFTS_DIR))?;
    ensure_dir(&data_dir.join(BRIEFS_DIR))?;
    Ok(())
}

/// Exclusive lock on a data directory, held for the lifetime of the server.
/// Released when dropped.
#[derive(Debug)]
pub struct StorageLock {
    _file: File,
}

/// Take the data directory lock, failing if another instance already holds it
pub fn acquire_lock(data_dir: &Path) -> FileResult<StorageLock> {
    ensure_dir(data_dir)?;
    let lock_path = data_dir.join(LOCK_FILE);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| format!("Failed to open lock file {:?}: {}", lock_path, e))?;

    file.try_lock_exclusive().map_err(|_| {
        format!(
            "Data directory {:?} is already in use by another instance",
            data_dir
        )
    })?;

    Ok(StorageLock { _file: file })
}
