//! Submitted brief storage operations
//!
//! Briefs are stored in `{data_dir}/briefs/{id}.json`, with a summary entry
//! in `briefs/index.json`. Once written, a brief is never modified.

use super::index::{read_index, rebuild_index, update_index_entry};
use super::{read_json, write_json, FileResult, BRIEFS_DIR};
use crate::models::{BriefSummary, SubmittedBrief};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version of the brief file format
const BRIEF_FILE_VERSION: u32 = 1;

/// On-disk brief file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefFile {
    /// File format version
    pub version: u32,
    /// The submitted brief
    pub brief: SubmittedBrief,
}

/// Get the path to a brief file
pub fn get_brief_path(data_dir: &Path, brief_id: &str) -> PathBuf {
    data_dir.join(BRIEFS_DIR).join(format!("{}.json", brief_id))
}

/// Persist a submitted brief and add it to the index
pub fn save_brief(data_dir: &Path, brief: &SubmittedBrief) -> FileResult<()> {
    let brief_file = BriefFile {
        version: BRIEF_FILE_VERSION,
        brief: brief.clone(),
    };

    let path = get_brief_path(data_dir, &brief.id);
    write_json(&path, &brief_file)?;

    let entry = brief.to_summary();
    update_index_entry::<BriefSummary, _>(data_dir, BRIEFS_DIR, &brief.id, |_| Some(entry))
}

/// Get a submitted brief by ID, failing if it doesn't exist
pub fn get_brief(data_dir: &Path, brief_id: &str) -> FileResult<SubmittedBrief> {
    let path = get_brief_path(data_dir, brief_id);

    if !path.exists() {
        return Err(format!("Brief not found: {}", brief_id));
    }

    let brief_file: BriefFile = read_json(&path)?;
    Ok(brief_file.brief)
}

/// Get a submitted brief by ID if it exists
pub fn get_brief_opt(data_dir: &Path, brief_id: &str) -> FileResult<Option<SubmittedBrief>> {
    let path = get_brief_path(data_dir, brief_id);

    if !path.exists() {
        return Ok(None);
    }

    let brief_file: BriefFile = read_json(&path)?;
    Ok(Some(brief_file.brief))
}

/// List all submitted briefs for a client, newest first
pub fn list_briefs(data_dir: &Path, client_id: &str) -> FileResult<Vec<BriefSummary>> {
    let index = read_index::<BriefSummary>(data_dir, BRIEFS_DIR)?;

    let mut briefs: Vec<BriefSummary> = index
        .entries
        .into_iter()
        .filter(|e| e.client_id == client_id)
        .collect();
    briefs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(briefs)
}

/// Rebuild the briefs index from the individual brief files
pub fn rebuild_briefs_index(data_dir: &Path) -> FileResult<Vec<BriefSummary>> {
    rebuild_index(data_dir, BRIEFS_DIR, |path| {
        let brief_file: BriefFile = read_json(path).ok()?;
        Some(brief_file.brief.to_summary())
    })
}
