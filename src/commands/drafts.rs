// Backend commands for draft management
//
// Uses file-based storage under <data_dir>/drafts/

use crate::models::{Draft, DraftDetail, DraftSummary, Response};
use crate::wizard;
use std::path::Path;

/// Get the client's open draft with its responses, if any
pub async fn get_active_draft(
    data_dir: &Path,
    client_id: String,
) -> Result<Option<DraftDetail>, String> {
    wizard::get_active_draft(data_dir, &client_id).map_err(|e| e.to_string())
}

/// List all drafts for a client, most recently updated first
pub async fn get_drafts(data_dir: &Path, client_id: String) -> Result<Vec<DraftSummary>, String> {
    wizard::list_drafts(data_dir, &client_id).map_err(|e| e.to_string())
}

/// Get one draft with its responses
pub async fn get_draft(
    data_dir: &Path,
    client_id: String,
    draft_id: String,
) -> Result<DraftDetail, String> {
    wizard::get_draft_detail(data_dir, &client_id, &draft_id).map_err(|e| e.to_string())
}

/// Get the responses recorded for one draft
pub async fn get_draft_responses(
    data_dir: &Path,
    client_id: String,
    draft_id: String,
) -> Result<Vec<Response>, String> {
    wizard::list_responses(data_dir, &client_id, &draft_id).map_err(|e| e.to_string())
}

/// Delete a draft and its responses, returning the deleted draft
pub async fn delete_draft(
    data_dir: &Path,
    client_id: String,
    draft_id: String,
) -> Result<Draft, String> {
    wizard::delete_draft(data_dir, &client_id, &draft_id).map_err(|e| e.to_string())
}
