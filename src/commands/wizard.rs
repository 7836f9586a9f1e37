// Backend commands for the brief submission wizard
//
// Thin wrappers over the wizard module; errors flatten to strings for the
// command proxy. Event emission is handled by the route layer.

use crate::catalog::QuestionCatalog;
use crate::models::{Draft, Question, Response, SubmittedBrief, WizardProgress};
use crate::suggestions::SuggestionProvider;
use crate::wizard::{self, AdvanceOutcome, CategorySuggestion, StartOutcome, WizardError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Suggestion lookup result; absent text means the provider had nothing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    pub question_id: String,
    pub suggested_text: Option<String>,
}

/// Start the wizard, resuming the client's open draft when one exists
pub async fn start_wizard(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: String,
) -> Result<StartOutcome, String> {
    wizard::start(data_dir, catalog, &client_id).map_err(|e| e.to_string())
}

/// Get the ordered questions for one wizard category
pub async fn get_wizard_questions(
    catalog: &QuestionCatalog,
    client_id: String,
    category: String,
) -> Result<Vec<Question>, String> {
    wizard::questions_for_category(catalog, &client_id, &category).map_err(|e| e.to_string())
}

/// Record or replace the answer to one question
#[allow(clippy::too_many_arguments)]
pub async fn record_response(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: String,
    draft_id: String,
    question_id: String,
    response_text: String,
    ai_suggested_text: Option<String>,
    used_suggestion: bool,
) -> Result<Response, String> {
    wizard::record_response(
        data_dir,
        catalog,
        &client_id,
        &draft_id,
        &question_id,
        &response_text,
        ai_suggested_text.as_deref(),
        used_suggestion,
    )
    .map_err(|e| e.to_string())
}

/// Advance past the current category, finalizing on the last one
pub async fn advance_category(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: String,
    draft_id: String,
) -> Result<AdvanceOutcome, String> {
    wizard::advance_category(data_dir, catalog, &client_id, &draft_id).map_err(|e| e.to_string())
}

/// Generate the summary and mark the draft ready to submit
pub async fn finalize_draft(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: String,
    draft_id: String,
) -> Result<Draft, String> {
    wizard::finalize(data_dir, catalog, &client_id, &draft_id).map_err(|e| e.to_string())
}

/// Turn a finalized draft into a submitted brief
pub async fn submit_brief(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: String,
    draft_id: String,
    title: String,
    category: String,
) -> Result<SubmittedBrief, String> {
    wizard::submit(data_dir, catalog, &client_id, &draft_id, &title, &category)
        .map_err(|e| e.to_string())
}

/// Fetch a suggestion for one question
///
/// An unavailable suggestion is a normal outcome, not an error: the result
/// carries no text and the client falls back to manual entry.
pub async fn get_suggestion(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    provider: &dyn SuggestionProvider,
    client_id: String,
    draft_id: String,
    question_id: String,
) -> Result<SuggestionResult, String> {
    match wizard::suggestion_for(data_dir, catalog, provider, &client_id, &draft_id, &question_id)
    {
        Ok(text) => Ok(SuggestionResult {
            question_id,
            suggested_text: Some(text),
        }),
        Err(WizardError::SuggestionUnavailable(_)) => Ok(SuggestionResult {
            question_id,
            suggested_text: None,
        }),
        Err(e) => Err(e.to_string()),
    }
}

/// Prefetch suggestions for every question in a category
pub async fn get_category_suggestions(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    provider: &dyn SuggestionProvider,
    client_id: String,
    draft_id: String,
    category: String,
) -> Result<Vec<CategorySuggestion>, String> {
    wizard::category_suggestions(data_dir, catalog, provider, &client_id, &draft_id, &category)
        .map_err(|e| e.to_string())
}

/// Per-category answer counts for one draft
pub async fn get_wizard_progress(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: String,
    draft_id: String,
) -> Result<WizardProgress, String> {
    wizard::progress(data_dir, catalog, &client_id, &draft_id).map_err(|e| e.to_string())
}
