//! Draft storage operations
//!
//! Drafts are stored in `{data_dir}/drafts/{id}.json` with their responses
//! embedded. A summary entry is kept in `drafts/index.json` so listings and
//! the one-open-draft-per-client check never read individual draft files.

use super::index::{read_index, remove_index_entry, rebuild_index, update_index_entry};
use super::{read_json, write_json, FileResult, DRAFTS_DIR};
use crate::models::{Draft, DraftSummary, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Version of the draft file format
const DRAFT_FILE_VERSION: u32 = 1;

/// On-disk draft file: the draft plus all of its responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFile {
    /// File format version
    pub version: u32,
    /// The draft itself
    pub draft: Draft,
    /// Responses recorded so far, at most one per question
    #[serde(default)]
    pub responses: Vec<Response>,
}

impl DraftFile {
    /// Create a new draft file for a client, positioned on the first category
    pub fn new(client_id: &str, current_category: &str) -> Self {
        let now = Utc::now().to_rfc3339();

        Self {
            version: DRAFT_FILE_VERSION,
            draft: Draft {
                id: Uuid::new_v4().to_string(),
                client_id: client_id.to_string(),
                title: None,
                current_category: current_category.to_string(),
                completed: false,
                summary: None,
                submitted_brief_id: None,
                created_at: now.clone(),
                updated_at: now,
            },
            responses: Vec::new(),
        }
    }

    /// Index entry for this draft
    pub fn to_summary(&self) -> DraftSummary {
        DraftSummary {
            id: self.draft.id.clone(),
            client_id: self.draft.client_id.clone(),
            title: self.draft.title.clone(),
            current_category: self.draft.current_category.clone(),
            completed: self.draft.completed,
            submitted: self.draft.submitted_brief_id.is_some(),
            created_at: self.draft.created_at.clone(),
            updated_at: self.draft.updated_at.clone(),
        }
    }

    /// Find a response by question id
    pub fn response_for(&self, question_id: &str) -> Option<&Response> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }
}

/// Get the path to a draft file
pub fn get_draft_path(data_dir: &Path, draft_id: &str) -> PathBuf {
    data_dir.join(DRAFTS_DIR).join(format!("{}.json", draft_id))
}

/// Save a draft file and keep its index entry in sync
pub fn save_draft_file(data_dir: &Path, draft_file: &DraftFile) -> FileResult<()> {
    let path = get_draft_path(data_dir, &draft_file.draft.id);
    write_json(&path, draft_file)?;

    let entry = draft_file.to_summary();
    update_index_entry::<DraftSummary, _>(data_dir, DRAFTS_DIR, &draft_file.draft.id, |_| {
        Some(entry)
    })
}

/// Create a new draft for a client
///
/// Enforces the one-open-draft-per-client constraint: fails if the index
/// already holds an open draft for this client.
pub fn create_draft(
    data_dir: &Path,
    client_id: &str,
    current_category: &str,
) -> FileResult<DraftFile> {
    let index = read_index::<DraftSummary>(data_dir, DRAFTS_DIR)?;
    if index
        .entries
        .iter()
        .any(|e| e.client_id == client_id && e.is_open())
    {
        return Err(format!("Client {} already has an open draft", client_id));
    }

    let draft_file = DraftFile::new(client_id, current_category);
    save_draft_file(data_dir, &draft_file)?;
    Ok(draft_file)
}

/// Get a draft by ID, failing if it doesn't exist
pub fn get_draft(data_dir: &Path, draft_id: &str) -> FileResult<DraftFile> {
    let path = get_draft_path(data_dir, draft_id);

    if !path.exists() {
        return Err(format!("Draft not found: {}", draft_id));
    }

    read_json(&path)
}

/// Get a draft by ID if it exists
pub fn get_draft_opt(data_dir: &Path, draft_id: &str) -> FileResult<Option<DraftFile>> {
    let path = get_draft_path(data_dir, draft_id);

    if !path.exists() {
        return Ok(None);
    }

    read_json(&path).map(Some)
}

/// Get the client's open draft, if any
///
/// When stale data leaves more than one open entry behind, the most
/// recently created one wins.
pub fn get_active_draft(data_dir: &Path, client_id: &str) -> FileResult<Option<DraftFile>> {
    let index = read_index::<DraftSummary>(data_dir, DRAFTS_DIR)?;

    let mut open: Vec<&DraftSummary> = index
        .entries
        .iter()
        .filter(|e| e.client_id == client_id && e.is_open())
        .collect();
    open.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    match open.first() {
        Some(entry) => get_draft_opt(data_dir, &entry.id),
        None => Ok(None),
    }
}

/// List all drafts for a client, most recently updated first
pub fn list_drafts(data_dir: &Path, client_id: &str) -> FileResult<Vec<DraftSummary>> {
    let index = read_index::<DraftSummary>(data_dir, DRAFTS_DIR)?;

    let mut drafts: Vec<DraftSummary> = index
        .entries
        .into_iter()
        .filter(|e| e.client_id == client_id)
        .collect();
    drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(drafts)
}

/// Record or replace the response for one question (last write wins)
pub fn upsert_response(
    data_dir: &Path,
    draft_id: &str,
    question_id: &str,
    response_text: &str,
    ai_suggested_text: Option<&str>,
    used_suggestion: bool,
) -> FileResult<Response> {
    let mut draft_file = get_draft(data_dir, draft_id)?;

    if !draft_file.draft.is_open() {
        return Err(format!("Draft {} is no longer editable", draft_id));
    }

    let now = Utc::now().to_rfc3339();

    let response = match draft_file
        .responses
        .iter_mut()
        .find(|r| r.question_id == question_id)
    {
        Some(existing) => {
            existing.response_text = response_text.to_string();
            existing.ai_suggested_text = ai_suggested_text.map(|s| s.to_string());
            existing.used_suggestion = used_suggestion;
            existing.updated_at = now.clone();
            existing.clone()
        }
        None => {
            let response = Response {
                id: Uuid::new_v4().to_string(),
                draft_id: draft_id.to_string(),
                question_id: question_id.to_string(),
                response_text: response_text.to_string(),
                ai_suggested_text: ai_suggested_text.map(|s| s.to_string()),
                used_suggestion,
                updated_at: now.clone(),
            };
            draft_file.responses.push(response.clone());
            response
        }
    };

    draft_file.draft.updated_at = now;
    save_draft_file(data_dir, &draft_file)?;
    Ok(response)
}

/// Get all responses for a draft
pub fn list_responses(data_dir: &Path, draft_id: &str) -> FileResult<Vec<Response>> {
    let draft_file = get_draft(data_dir, draft_id)?;
    Ok(draft_file.responses)
}

/// Move the draft to another category
pub fn set_current_category(
    data_dir: &Path,
    draft_id: &str,
    category: &str,
) -> FileResult<DraftFile> {
    let mut draft_file = get_draft(data_dir, draft_id)?;

    draft_file.draft.current_category = category.to_string();
    draft_file.draft.updated_at = Utc::now().to_rfc3339();

    save_draft_file(data_dir, &draft_file)?;
    Ok(draft_file)
}

/// Mark a draft completed with its generated summary
pub fn mark_completed(data_dir: &Path, draft_id: &str, summary: &str) -> FileResult<DraftFile> {
    if summary.trim().is_empty() {
        return Err("Summary cannot be empty".to_string());
    }

    let mut draft_file = get_draft(data_dir, draft_id)?;

    draft_file.draft.completed = true;
    draft_file.draft.summary = Some(summary.to_string());
    draft_file.draft.updated_at = Utc::now().to_rfc3339();

    save_draft_file(data_dir, &draft_file)?;
    Ok(draft_file)
}

/// Record the brief a draft was submitted as
pub fn mark_submitted(
    data_dir: &Path,
    draft_id: &str,
    brief_id: &str,
    title: &str,
) -> FileResult<DraftFile> {
    let mut draft_file = get_draft(data_dir, draft_id)?;

    draft_file.draft.submitted_brief_id = Some(brief_id.to_string());
    draft_file.draft.title = Some(title.to_string());
    draft_file.draft.updated_at = Utc::now().to_rfc3339();

    save_draft_file(data_dir, &draft_file)?;
    Ok(draft_file)
}

/// Delete a draft and its responses (responses live inside the draft file)
pub fn delete_draft(data_dir: &Path, draft_id: &str) -> FileResult<()> {
    let path = get_draft_path(data_dir, draft_id);

    if path.exists() {
        fs::remove_file(&path).map_err(|e| format!("Failed to delete {:?}: {}", path, e))?;
    }

    remove_index_entry::<DraftSummary>(data_dir, DRAFTS_DIR, draft_id)
}

/// Rebuild the drafts index from the individual draft files
pub fn rebuild_drafts_index(data_dir: &Path) -> FileResult<Vec<DraftSummary>> {
    rebuild_index(data_dir, DRAFTS_DIR, |path| {
        let draft_file: DraftFile = read_json(path).ok()?;
        Some(draft_file.to_summary())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_get_draft() {
        let temp_dir = TempDir::new().unwrap();
        let created = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();

        assert_eq!(created.version, DRAFT_FILE_VERSION);
        assert_eq!(created.draft.client_id, "client-1");
        assert_eq!(created.draft.current_category, "objectives");
        assert!(created.draft.is_open());

        let loaded = get_draft(temp_dir.path(), &created.draft.id).unwrap();
        assert_eq!(loaded.draft.id, created.draft.id);
        assert!(loaded.responses.is_empty());
    }

    #[test]
    fn test_get_missing_draft() {
        let temp_dir = TempDir::new().unwrap();

        let result = get_draft(temp_dir.path(), "nonexistent");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Draft not found"));

        let opt = get_draft_opt(temp_dir.path(), "nonexistent").unwrap();
        assert!(opt.is_none());
    }

    #[test]
    fn test_one_open_draft_per_client() {
        let temp_dir = TempDir::new().unwrap();
        create_draft(temp_dir.path(), "client-1", "objectives").unwrap();

        let second = create_draft(temp_dir.path(), "client-1", "objectives");
        assert!(second.is_err());
        assert!(second.unwrap_err().contains("already has an open draft"));

        // A different client is unaffected
        create_draft(temp_dir.path(), "client-2", "objectives").unwrap();
    }

    #[test]
    fn test_create_allowed_after_completion() {
        let temp_dir = TempDir::new().unwrap();
        let first = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();

        mark_completed(temp_dir.path(), &first.draft.id, "## Summary").unwrap();

        // Completed drafts no longer count as open
        create_draft(temp_dir.path(), "client-1", "objectives").unwrap();
    }

    #[test]
    fn test_get_active_draft() {
        let temp_dir = TempDir::new().unwrap();
        assert!(get_active_draft(temp_dir.path(), "client-1")
            .unwrap()
            .is_none());

        let created = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();
        let active = get_active_draft(temp_dir.path(), "client-1")
            .unwrap()
            .unwrap();
        assert_eq!(active.draft.id, created.draft.id);

        mark_completed(temp_dir.path(), &created.draft.id, "## Summary").unwrap();
        assert!(get_active_draft(temp_dir.path(), "client-1")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_list_drafts_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();

        let first = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();
        mark_completed(temp_dir.path(), &first.draft.id, "## Summary").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();
        create_draft(temp_dir.path(), "client-2", "objectives").unwrap();

        let drafts = list_drafts(temp_dir.path(), "client-1").unwrap();
        assert_eq!(drafts.len(), 2);
        // Most recently updated first
        assert_eq!(drafts[0].id, second.draft.id);
        assert!(drafts[1].completed);
    }

    #[test]
    fn test_upsert_response_inserts_then_replaces() {
        let temp_dir = TempDir::new().unwrap();
        let draft = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();

        let inserted = upsert_response(
            temp_dir.path(),
            &draft.draft.id,
            "obj-goal",
            "Grow online sales",
            None,
            false,
        )
        .unwrap();
        assert_eq!(inserted.response_text, "Grow online sales");

        let replaced = upsert_response(
            temp_dir.path(),
            &draft.draft.id,
            "obj-goal",
            "Launch a new product line",
            Some("Grow online sales"),
            false,
        )
        .unwrap();

        // Same response slot: id is stable, content replaced
        assert_eq!(replaced.id, inserted.id);
        assert_eq!(replaced.response_text, "Launch a new product line");
        assert_eq!(
            replaced.ai_suggested_text.as_deref(),
            Some("Grow online sales")
        );

        let responses = list_responses(temp_dir.path(), &draft.draft.id).unwrap();
        assert_eq!(responses.len(), 1);
    }

    #[test]
    fn test_upsert_response_rejects_completed_draft() {
        let temp_dir = TempDir::new().unwrap();
        let draft = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();
        mark_completed(temp_dir.path(), &draft.draft.id, "## Summary").unwrap();

        let result = upsert_response(
            temp_dir.path(),
            &draft.draft.id,
            "obj-goal",
            "Too late",
            None,
            false,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("no longer editable"));
    }

    #[test]
    fn test_set_current_category() {
        let temp_dir = TempDir::new().unwrap();
        let draft = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();

        let updated = set_current_category(temp_dir.path(), &draft.draft.id, "audience").unwrap();
        assert_eq!(updated.draft.current_category, "audience");

        let drafts = list_drafts(temp_dir.path(), "client-1").unwrap();
        assert_eq!(drafts[0].current_category, "audience");
    }

    #[test]
    fn test_mark_completed() {
        let temp_dir = TempDir::new().unwrap();
        let draft = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();

        let completed =
            mark_completed(temp_dir.path(), &draft.draft.id, "## Objectives\n\n...").unwrap();
        assert!(completed.draft.completed);
        assert_eq!(
            completed.draft.summary.as_deref(),
            Some("## Objectives\n\n...")
        );
        assert!(!completed.draft.is_open());
    }

    #[test]
    fn test_mark_completed_rejects_blank_summary() {
        let temp_dir = TempDir::new().unwrap();
        let draft = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();

        let result = mark_completed(temp_dir.path(), &draft.draft.id, "   ");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Summary cannot be empty"));
    }

    #[test]
    fn test_mark_submitted() {
        let temp_dir = TempDir::new().unwrap();
        let draft = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();
        mark_completed(temp_dir.path(), &draft.draft.id, "## Summary").unwrap();

        let submitted =
            mark_submitted(temp_dir.path(), &draft.draft.id, "brief-1", "Logo redesign").unwrap();
        assert_eq!(submitted.draft.submitted_brief_id.as_deref(), Some("brief-1"));
        assert_eq!(submitted.draft.title.as_deref(), Some("Logo redesign"));

        let drafts = list_drafts(temp_dir.path(), "client-1").unwrap();
        assert!(drafts[0].submitted);
    }

    #[test]
    fn test_delete_draft_removes_file_and_index_entry() {
        let temp_dir = TempDir::new().unwrap();
        let draft = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();
        upsert_response(
            temp_dir.path(),
            &draft.draft.id,
            "obj-goal",
            "Grow online sales",
            None,
            false,
        )
        .unwrap();

        delete_draft(temp_dir.path(), &draft.draft.id).unwrap();

        assert!(get_draft_opt(temp_dir.path(), &draft.draft.id)
            .unwrap()
            .is_none());
        assert!(list_drafts(temp_dir.path(), "client-1").unwrap().is_empty());

        // Deleting again is a no-op
        delete_draft(temp_dir.path(), &draft.draft.id).unwrap();
    }

    #[test]
    fn test_rebuild_drafts_index() {
        let temp_dir = TempDir::new().unwrap();
        let first = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();
        mark_completed(temp_dir.path(), &first.draft.id, "## Summary").unwrap();
        let second = create_draft(temp_dir.path(), "client-1", "objectives").unwrap();

        // Simulate a lost index
        std::fs::remove_file(super::super::index::get_index_path(
            temp_dir.path(),
            DRAFTS_DIR,
        ))
        .unwrap();
        assert!(list_drafts(temp_dir.path(), "client-1").unwrap().is_empty());

        let rebuilt = rebuild_drafts_index(temp_dir.path()).unwrap();
        assert_eq!(rebuilt.len(), 2);

        let drafts = list_drafts(temp_dir.path(), "client-1").unwrap();
        assert_eq!(drafts.len(), 2);
        assert!(drafts.iter().any(|d| d.id == second.draft.id));
    }
}
