//! Index file management for efficient listing
//!
//! Index files provide quick access to lists of entities without reading
//! all individual files. They contain minimal metadata for listing views.

use super::{atomic_write, ensure_dir, read_json, FileResult};
use crate::models::{BriefSummary, DraftSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Version of the index file format
const INDEX_VERSION: u32 = 1;

/// Generic index file wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFile<T> {
    /// File format version
    pub version: u32,
    /// When this index was last updated
    pub updated_at: DateTime<Utc>,
    /// The indexed entries
    pub entries: Vec<T>,
}

impl<T> Default for IndexFile<T> {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            updated_at: Utc::now(),
            entries: Vec::new(),
        }
    }
}

/// Get the path to the index file for a storage subdirectory
pub fn get_index_path(data_dir: &Path, kind: &str) -> std::path::PathBuf {
    data_dir.join(kind).join("index.json")
}

/// Read an index file, returning an empty index if it doesn't exist
pub fn read_index<T: serde::de::DeserializeOwned>(
    data_dir: &Path,
    kind: &str,
) -> FileResult<IndexFile<T>> {
    let index_path = get_index_path(data_dir, kind);

    if !index_path.exists() {
        return Ok(IndexFile {
            version: INDEX_VERSION,
            updated_at: Utc::now(),
            entries: Vec::new(),
        });
    }

    read_json(&index_path)
}

/// Write an index file
pub fn write_index<T: serde::Serialize>(
    data_dir: &Path,
    kind: &str,
    entries: Vec<T>,
) -> FileResult<()> {
    let index_path = get_index_path(data_dir, kind);

    if let Some(parent) = index_path.parent() {
        ensure_dir(parent)?;
    }

    let index = IndexFile {
        version: INDEX_VERSION,
        updated_at: Utc::now(),
        entries,
    };

    let content = serde_json::to_string_pretty(&index)
        .map_err(|e| format!("Failed to serialize index: {}", e))?;

    atomic_write(&index_path, &content)
}

/// Update a single entry in an index file
pub fn update_index_entry<T, F>(
    data_dir: &Path,
    kind: &str,
    entry_id: &str,
    update_fn: F,
) -> FileResult<()>
where
    T: serde::de::DeserializeOwned + serde::Serialize + Clone,
    F: FnOnce(Option<T>) -> Option<T>,
    T: HasId,
{
    let mut index: IndexFile<T> = read_index(data_dir, kind)?;

    // Find existing entry
    let existing_idx = index.entries.iter().position(|e| e.get_id() == entry_id);

    // Apply update function
    let existing = existing_idx.map(|idx| index.entries[idx].clone());
    let updated = update_fn(existing);

    match (existing_idx, updated) {
        // Entry exists and should be updated
        (Some(idx), Some(entry)) => {
            index.entries[idx] = entry;
        }
        // Entry doesn't exist but should be added
        (None, Some(entry)) => {
            index.entries.push(entry);
        }
        // Entry exists but should be removed
        (Some(idx), None) => {
            index.entries.remove(idx);
        }
        // Entry doesn't exist and shouldn't be added
        (None, None) => {}
    }

    write_index(data_dir, kind, index.entries)
}

/// Remove an entry from an index file
pub fn remove_index_entry<T>(data_dir: &Path, kind: &str, entry_id: &str) -> FileResult<()>
where
    T: serde::de::DeserializeOwned + serde::Serialize + HasId,
{
    let mut index: IndexFile<T> = read_index(data_dir, kind)?;

    let initial_len = index.entries.len();
    index.entries.retain(|e| e.get_id() != entry_id);

    // Only write if something changed
    if index.entries.len() != initial_len {
        write_index(data_dir, kind, index.entries)?;
    }

    Ok(())
}

/// Rebuild an index from individual files in a storage subdirectory
pub fn rebuild_index<T, F>(data_dir: &Path, kind: &str, file_to_entry: F) -> FileResult<Vec<T>>
where
    T: serde::Serialize + Clone,
    F: Fn(&Path) -> Option<T>,
{
    let dir_path = data_dir.join(kind);

    if !dir_path.exists() {
        return Ok(Vec::new());
    }

    let entries: Vec<T> = fs::read_dir(&dir_path)
        .map_err(|e| format!("Failed to read directory {:?}: {}", dir_path, e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext == "json")
                .unwrap_or(false)
        })
        .filter(|entry| {
            // Skip index.json itself
            entry.file_name() != "index.json"
        })
        .filter_map(|entry| file_to_entry(&entry.path()))
        .collect();

    write_index(data_dir, kind, entries.clone())?;

    Ok(entries)
}

/// Trait for types that have an ID field
pub trait HasId {
    fn get_id(&self) -> &str;
}

impl HasId for DraftSummary {
    fn get_id(&self) -> &str {
        &self.id
    }
}

impl HasId for BriefSummary {
    fn get_id(&self) -> &str {
        &self.id
    }
}
