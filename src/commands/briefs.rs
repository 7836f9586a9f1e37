// Backend commands for submitted briefs
//
// Uses file-based storage under <data_dir>/briefs/

use crate::models::{BriefSummary, SubmittedBrief};
use crate::wizard;
use std::path::Path;

/// List the client's submitted briefs, newest first
pub async fn get_briefs(data_dir: &Path, client_id: String) -> Result<Vec<BriefSummary>, String> {
    wizard::list_briefs(data_dir, &client_id).map_err(|e| e.to_string())
}

/// Get one submitted brief
pub async fn get_brief(
    data_dir: &Path,
    client_id: String,
    brief_id: String,
) -> Result<SubmittedBrief, String> {
    wizard::get_brief(data_dir, &client_id, &brief_id).map_err(|e| e.to_string())
}
