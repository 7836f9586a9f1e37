//! Brief submission wizard
//!
//! Walks a client through the question catalog category by category,
//! records answers, and turns the finished Q&A into a submitted brief.
//! Every operation takes the caller's client id explicitly and checks it
//! against the draft's owner before touching anything.

pub mod summary;

use crate::catalog::QuestionCatalog;
use crate::file_storage::drafts::DraftFile;
use crate::file_storage::{briefs, drafts};
use crate::models::state_machine::can_transition;
use crate::models::{
    AnsweredQuestion, BriefSummary, CategoryProgress, Draft, DraftDetail, DraftSummary, Question,
    Response, SubmittedBrief, WizardProgress, WizardStage,
};
use crate::suggestions::SuggestionProvider;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Error taxonomy for wizard operations
#[derive(Debug, Error)]
pub enum WizardError {
    /// No client id was supplied with the request
    #[error("Authentication required")]
    AuthRequired,
    /// The request referenced something unknown or broke a wizard rule
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    /// Underlying storage failed; prior persisted state is untouched
    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),
    /// The suggestion provider failed or had nothing to offer
    #[error("No suggestion available: {0}")]
    SuggestionUnavailable(String),
    /// The summary could not be rendered at finalize time
    #[error("Summary generation failed: {0}")]
    SummaryGenerationFailed(String),
}

pub type WizardResult<T> = Result<T, WizardError>;

/// Result of `start`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOutcome {
    pub draft: Draft,
    /// True when an existing open draft was resumed instead of created
    pub resumed: bool,
}

/// Result of `advance_category`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceOutcome {
    pub draft: Draft,
    /// True when there was no next category and the draft was finalized
    pub is_complete: bool,
}

/// Suggested answer for one question of a category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestion {
    pub question_id: String,
    pub suggested_text: String,
}

/// Reject blank client ids before touching storage
pub fn require_client(client_id: &str) -> WizardResult<()> {
    if client_id.trim().is_empty() {
        return Err(WizardError::AuthRequired);
    }
    Ok(())
}

/// Load a draft and check it belongs to the caller
fn load_owned_draft(data_dir: &Path, client_id: &str, draft_id: &str) -> WizardResult<DraftFile> {
    let draft_file = drafts::get_draft_opt(data_dir, draft_id)
        .map_err(WizardError::PersistenceFailed)?
        .ok_or_else(|| WizardError::ValidationFailed(format!("Draft not found: {}", draft_id)))?;

    if draft_file.draft.client_id != client_id {
        return Err(WizardError::ValidationFailed(format!(
            "Draft {} does not belong to this client",
            draft_id
        )));
    }

    Ok(draft_file)
}

/// Questions in `category` whose answer is missing or blank
fn unanswered_in_category(
    catalog: &QuestionCatalog,
    draft_file: &DraftFile,
    category: &str,
) -> usize {
    catalog
        .questions_for_category(category)
        .iter()
        .filter(|q| {
            draft_file
                .response_for(&q.id)
                .map_or(true, |r| r.response_text.trim().is_empty())
        })
        .count()
}

/// All answered (question, response) pairs in catalog order
fn answered_questions(catalog: &QuestionCatalog, draft_file: &DraftFile) -> Vec<AnsweredQuestion> {
    let mut answered = Vec::new();

    for category in catalog.categories() {
        for question in catalog.questions_for_category(&category.name) {
            if let Some(response) = draft_file.response_for(&question.id) {
                if !response.response_text.trim().is_empty() {
                    answered.push(AnsweredQuestion {
                        question_id: question.id.clone(),
                        question_text: question.text.clone(),
                        response_text: response.response_text.clone(),
                    });
                }
            }
        }
    }

    answered
}

/// Start the wizard: resume the client's open draft or create a new one
/// positioned on the first catalog category
pub fn start(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: &str,
) -> WizardResult<StartOutcome> {
    require_client(client_id)?;

    if let Some(existing) =
        drafts::get_active_draft(data_dir, client_id).map_err(WizardError::PersistenceFailed)?
    {
        return Ok(StartOutcome {
            draft: existing.draft,
            resumed: true,
        });
    }

    let first_category = catalog
        .first_category()
        .ok_or_else(|| WizardError::ValidationFailed("Catalog has no categories".to_string()))?;

    let created = drafts::create_draft(data_dir, client_id, first_category)
        .map_err(WizardError::PersistenceFailed)?;

    Ok(StartOutcome {
        draft: created.draft,
        resumed: false,
    })
}

/// Questions for one category, in order
pub fn questions_for_category(
    catalog: &QuestionCatalog,
    client_id: &str,
    category: &str,
) -> WizardResult<Vec<Question>> {
    require_client(client_id)?;

    if catalog.category(category).is_none() {
        return Err(WizardError::ValidationFailed(format!(
            "Unknown category: {}",
            category
        )));
    }

    Ok(catalog.questions_for_category(category))
}

/// Record (or replace) the caller's answer to one question
///
/// Last write wins per (draft, question) pair. Blank text is accepted here;
/// it only blocks `advance_category` and `finalize`, which require every
/// question of the relevant scope to carry a non-blank answer.
#[allow(clippy::too_many_arguments)]
pub fn record_response(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: &str,
    draft_id: &str,
    question_id: &str,
    response_text: &str,
    ai_suggested_text: Option<&str>,
    used_suggestion: bool,
) -> WizardResult<Response> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    if !draft_file.draft.is_open() {
        return Err(WizardError::ValidationFailed(format!(
            "Draft {} is no longer accepting answers",
            draft_id
        )));
    }

    if catalog.question(question_id).is_none() {
        return Err(WizardError::ValidationFailed(format!(
            "Unknown question: {}",
            question_id
        )));
    }

    drafts::upsert_response(
        data_dir,
        draft_id,
        question_id,
        response_text,
        ai_suggested_text,
        used_suggestion,
    )
    .map_err(WizardError::PersistenceFailed)
}

/// Advance the wizard past its current category
///
/// Every question in the current category must carry a non-blank answer.
/// On the last category the draft is finalized instead of advanced.
pub fn advance_category(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: &str,
    draft_id: &str,
) -> WizardResult<AdvanceOutcome> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    if !draft_file.draft.is_open() {
        return Err(WizardError::ValidationFailed(format!(
            "Draft {} is no longer accepting answers",
            draft_id
        )));
    }

    let current = draft_file.draft.current_category.clone();
    if catalog.category(&current).is_none() {
        return Err(WizardError::ValidationFailed(format!(
            "Draft {} sits on a category missing from the catalog: {}",
            draft_id, current
        )));
    }

    let unanswered = unanswered_in_category(catalog, &draft_file, &current);
    if unanswered > 0 {
        return Err(WizardError::ValidationFailed(format!(
            "{} unanswered question(s) in category '{}'",
            unanswered, current
        )));
    }

    match catalog.category_after(&current) {
        Some(next) => {
            let updated = drafts::set_current_category(data_dir, draft_id, next)
                .map_err(WizardError::PersistenceFailed)?;

            Ok(AdvanceOutcome {
                draft: updated.draft,
                is_complete: false,
            })
        }
        None => {
            let finalized = finalize(data_dir, catalog, client_id, draft_id)?;

            Ok(AdvanceOutcome {
                draft: finalized,
                is_complete: true,
            })
        }
    }
}

/// Generate the summary and mark the draft ready to submit
///
/// Requires every catalog question to carry a non-blank answer. Happens at
/// most once per draft; a completed draft cannot be finalized again.
pub fn finalize(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: &str,
    draft_id: &str,
) -> WizardResult<Draft> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    let stage = draft_file.draft.stage();
    if !can_transition(stage, WizardStage::ReadyToSubmit) {
        return Err(WizardError::ValidationFailed(format!(
            "Cannot finalize a draft in stage {}",
            stage
        )));
    }

    let unanswered: usize = catalog
        .categories()
        .iter()
        .map(|c| unanswered_in_category(catalog, &draft_file, &c.name))
        .sum();
    if unanswered > 0 {
        return Err(WizardError::ValidationFailed(format!(
            "{} unanswered question(s) remain",
            unanswered
        )));
    }

    let summary = summary::generate_summary(catalog, &draft_file.responses)
        .map_err(WizardError::SummaryGenerationFailed)?;

    let completed =
        drafts::mark_completed(data_dir, draft_id, &summary).map_err(WizardError::PersistenceFailed)?;

    Ok(completed.draft)
}

/// Create the submitted brief from a finalized draft
///
/// `title` and `category` (the service category the client files under)
/// must be non-blank. Budget and deadline are extracted from the recorded
/// answers, with fallbacks when nothing usable was written.
pub fn submit(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: &str,
    draft_id: &str,
    title: &str,
    category: &str,
) -> WizardResult<SubmittedBrief> {
    require_client(client_id)?;

    let title = title.trim();
    if title.is_empty() {
        return Err(WizardError::ValidationFailed(
            "Title cannot be empty".to_string(),
        ));
    }

    let category = category.trim();
    if category.is_empty() {
        return Err(WizardError::ValidationFailed(
            "Category cannot be empty".to_string(),
        ));
    }

    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    let stage = draft_file.draft.stage();
    if !can_transition(stage, WizardStage::Submitted) {
        return Err(WizardError::ValidationFailed(format!(
            "Cannot submit a draft in stage {}",
            stage
        )));
    }

    let summary_text = draft_file
        .draft
        .summary
        .clone()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            WizardError::ValidationFailed("Draft has no generated summary".to_string())
        })?;

    let now = Utc::now();
    let brief = SubmittedBrief {
        id: Uuid::new_v4().to_string(),
        client_id: client_id.to_string(),
        title: title.to_string(),
        summary_text,
        budget: summary::extract_budget(catalog, &draft_file.responses),
        deadline: summary::extract_deadline(catalog, &draft_file.responses, now),
        category: category.to_string(),
        created_at: now.to_rfc3339(),
    };

    // Write the brief before pointing the draft at it
    briefs::save_brief(data_dir, &brief).map_err(WizardError::PersistenceFailed)?;
    drafts::mark_submitted(data_dir, draft_id, &brief.id, title)
        .map_err(WizardError::PersistenceFailed)?;

    Ok(brief)
}

/// Ask the suggestion provider for an answer to one question
///
/// Provider failures and empty offers both map to SuggestionUnavailable.
/// Nothing else in the wizard depends on this call succeeding.
pub fn suggestion_for(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    provider: &dyn SuggestionProvider,
    client_id: &str,
    draft_id: &str,
    question_id: &str,
) -> WizardResult<String> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    let question = catalog
        .question(question_id)
        .ok_or_else(|| WizardError::ValidationFailed(format!("Unknown question: {}", question_id)))?;

    let prior = answered_questions(catalog, &draft_file);

    match provider.suggest(question, &prior) {
        Ok(Some(text)) if !text.trim().is_empty() => Ok(text),
        Ok(_) => Err(WizardError::SuggestionUnavailable(format!(
            "provider returned nothing for question {}",
            question_id
        ))),
        Err(e) => {
            log::warn!("Suggestion provider failed for {}: {}", question_id, e);
            Err(WizardError::SuggestionUnavailable(e))
        }
    }
}

/// Prefetch suggestions for every question in a category
///
/// Questions the provider cannot answer are omitted from the result.
pub fn category_suggestions(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    provider: &dyn SuggestionProvider,
    client_id: &str,
    draft_id: &str,
    category: &str,
) -> WizardResult<Vec<CategorySuggestion>> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    if catalog.category(category).is_none() {
        return Err(WizardError::ValidationFailed(format!(
            "Unknown category: {}",
            category
        )));
    }

    let prior = answered_questions(catalog, &draft_file);
    let mut suggestions = Vec::new();

    for question in catalog.questions_for_category(category) {
        match provider.suggest(&question, &prior) {
            Ok(Some(text)) if !text.trim().is_empty() => {
                suggestions.push(CategorySuggestion {
                    question_id: question.id.clone(),
                    suggested_text: text,
                });
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Suggestion provider failed for {}: {}", question.id, e);
            }
        }
    }

    Ok(suggestions)
}

/// Per-category and overall answer counts for one draft
pub fn progress(
    data_dir: &Path,
    catalog: &QuestionCatalog,
    client_id: &str,
    draft_id: &str,
) -> WizardResult<WizardProgress> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    let mut categories = Vec::new();
    let mut answered_total = 0usize;
    let mut total = 0usize;

    for category in catalog.categories() {
        let questions = catalog.questions_for_category(&category.name);
        let answered = questions
            .iter()
            .filter(|q| {
                draft_file
                    .response_for(&q.id)
                    .map_or(false, |r| !r.response_text.trim().is_empty())
            })
            .count();

        answered_total += answered;
        total += questions.len();
        categories.push(CategoryProgress {
            category: category.name.clone(),
            title: category.title.clone(),
            answered,
            total: questions.len(),
            complete: !questions.is_empty() && answered == questions.len(),
        });
    }

    let percent = if total == 0 {
        0
    } else {
        ((answered_total * 100) / total) as u8
    };

    Ok(WizardProgress {
        draft_id: draft_id.to_string(),
        current_category: draft_file.draft.current_category.clone(),
        categories,
        answered: answered_total,
        total,
        percent,
    })
}

/// The caller's open draft with its responses, if one exists
pub fn get_active_draft(data_dir: &Path, client_id: &str) -> WizardResult<Option<DraftDetail>> {
    require_client(client_id)?;

    let draft_file =
        drafts::get_active_draft(data_dir, client_id).map_err(WizardError::PersistenceFailed)?;

    Ok(draft_file.map(|f| DraftDetail {
        draft: f.draft,
        responses: f.responses,
    }))
}

/// All of the caller's drafts, most recently updated first
pub fn list_drafts(data_dir: &Path, client_id: &str) -> WizardResult<Vec<DraftSummary>> {
    require_client(client_id)?;
    drafts::list_drafts(data_dir, client_id).map_err(WizardError::PersistenceFailed)
}

/// One draft with its responses, checked against the caller
pub fn get_draft_detail(
    data_dir: &Path,
    client_id: &str,
    draft_id: &str,
) -> WizardResult<DraftDetail> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    Ok(DraftDetail {
        draft: draft_file.draft,
        responses: draft_file.responses,
    })
}

/// Responses recorded for one draft, checked against the caller
pub fn list_responses(
    data_dir: &Path,
    client_id: &str,
    draft_id: &str,
) -> WizardResult<Vec<Response>> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;
    Ok(draft_file.responses)
}

/// Delete a draft and its responses, returning the deleted draft
pub fn delete_draft(data_dir: &Path, client_id: &str, draft_id: &str) -> WizardResult<Draft> {
    require_client(client_id)?;
    let draft_file = load_owned_draft(data_dir, client_id, draft_id)?;

    drafts::delete_draft(data_dir, draft_id).map_err(WizardError::PersistenceFailed)?;
    Ok(draft_file.draft)
}

/// All of the caller's submitted briefs, newest first
pub fn list_briefs(data_dir: &Path, client_id: &str) -> WizardResult<Vec<BriefSummary>> {
    require_client(client_id)?;
    briefs::list_briefs(data_dir, client_id).map_err(WizardError::PersistenceFailed)
}

/// One submitted brief, checked against the caller
pub fn get_brief(data_dir: &Path, client_id: &str, brief_id: &str) -> WizardResult<SubmittedBrief> {
    require_client(client_id)?;

    let brief = briefs::get_brief_opt(data_dir, brief_id)
        .map_err(WizardError::PersistenceFailed)?
        .ok_or_else(|| WizardError::ValidationFailed(format!("Brief not found: {}", brief_id)))?;

    if brief.client_id != client_id {
        return Err(WizardError::ValidationFailed(format!(
            "Brief {} does not belong to this client",
            brief_id
        )));
    }

    Ok(brief)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogCategory, FieldType};
    use crate::suggestions::StaticSuggestionProvider;
    use chrono::DateTime;
    use tempfile::TempDir;

    const CLIENT: &str = "client-1";

    fn make_question(id: &str, text: &str, category: &str, order: u32) -> Question {
        Question {
            id: id.to_string(),
            text: text.to_string(),
            category: category.to_string(),
            order_in_category: order,
            placeholder: None,
            help_text: None,
            field_type: FieldType::Textarea,
            options: None,
        }
    }

    /// Two categories: "objectives" with two questions, "budget" with one
    fn test_catalog() -> QuestionCatalog {
        let categories = vec![
            CatalogCategory {
                name: "objectives".to_string(),
                title: "Objectives".to_string(),
                order: 0,
            },
            CatalogCategory {
                name: "budget".to_string(),
                title: "Budget".to_string(),
                order: 1,
            },
        ];
        let questions = vec![
            make_question("q-goal", "What is the goal?", "objectives", 0),
            make_question("q-success", "What does success look like?", "objectives", 1),
            make_question("q-budget", "What is your budget?", "budget", 0),
        ];

        QuestionCatalog::from_parts(categories, questions).unwrap()
    }

    fn record(
        data_dir: &Path,
        catalog: &QuestionCatalog,
        draft_id: &str,
        question_id: &str,
        text: &str,
    ) {
        record_response(
            data_dir, catalog, CLIENT, draft_id, question_id, text, None, false,
        )
        .unwrap();
    }

    /// Answer everything and finalize, returning the draft id
    fn finalized_draft(data_dir: &Path, catalog: &QuestionCatalog) -> String {
        let outcome = start(data_dir, catalog, CLIENT).unwrap();
        let draft_id = outcome.draft.id;

        record(data_dir, catalog, &draft_id, "q-goal", "Grow online sales");
        record(data_dir, catalog, &draft_id, "q-success", "More signups");
        record(
            data_dir,
            catalog,
            &draft_id,
            "q-budget",
            "whatever you think is fair",
        );
        finalize(data_dir, catalog, CLIENT, &draft_id).unwrap();

        draft_id
    }

    struct FailingProvider;

    impl SuggestionProvider for FailingProvider {
        fn suggest(
            &self,
            _question: &Question,
            _prior: &[AnsweredQuestion],
        ) -> Result<Option<String>, String> {
            Err("provider offline".to_string())
        }
    }

    struct SilentProvider;

    impl SuggestionProvider for SilentProvider {
        fn suggest(
            &self,
            _question: &Question,
            _prior: &[AnsweredQuestion],
        ) -> Result<Option<String>, String> {
            Ok(None)
        }
    }

    #[test]
    fn test_start_creates_draft_on_first_category() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();

        let outcome = start(temp_dir.path(), &catalog, CLIENT).unwrap();
        assert!(!outcome.resumed);
        assert_eq!(outcome.draft.client_id, CLIENT);
        assert_eq!(outcome.draft.current_category, "objectives");
        assert_eq!(outcome.draft.stage(), WizardStage::InProgress);
    }

    #[test]
    fn test_start_resumes_open_draft() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();

        let first = start(temp_dir.path(), &catalog, CLIENT).unwrap();
        let second = start(temp_dir.path(), &catalog, CLIENT).unwrap();

        assert!(second.resumed);
        assert_eq!(second.draft.id, first.draft.id);
    }

    #[test]
    fn test_start_requires_client() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();

        let err = start(temp_dir.path(), &catalog, "").unwrap_err();
        assert!(matches!(err, WizardError::AuthRequired));

        let err = start(temp_dir.path(), &catalog, "   ").unwrap_err();
        assert!(matches!(err, WizardError::AuthRequired));
    }

    #[test]
    fn test_start_after_submit_creates_fresh_draft() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();

        let draft_id = finalized_draft(temp_dir.path(), &catalog);
        submit(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "Logo redesign",
            "design",
        )
        .unwrap();

        let outcome = start(temp_dir.path(), &catalog, CLIENT).unwrap();
        assert!(!outcome.resumed);
        assert_ne!(outcome.draft.id, draft_id);
    }

    #[test]
    fn test_questions_for_category() {
        let catalog = test_catalog();

        let questions = questions_for_category(&catalog, CLIENT, "objectives").unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, "q-goal");

        let err = questions_for_category(&catalog, CLIENT, "nope").unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));
    }

    #[test]
    fn test_record_response_upserts() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let first = record_response(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "q-goal",
            "Grow online sales",
            None,
            false,
        )
        .unwrap();

        let second = record_response(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "q-goal",
            "Launch a new product",
            None,
            false,
        )
        .unwrap();

        // Exactly one response per (draft, question), latest text wins
        assert_eq!(second.id, first.id);
        let responses = list_responses(temp_dir.path(), CLIENT, &draft_id).unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].response_text, "Launch a new product");
    }

    #[test]
    fn test_record_response_keeps_suggestion_fields() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let response = record_response(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "q-goal",
            "Grow online sales",
            Some("Grow online sales"),
            true,
        )
        .unwrap();

        assert!(response.used_suggestion);
        assert_eq!(
            response.ai_suggested_text.as_deref(),
            Some("Grow online sales")
        );
    }

    #[test]
    fn test_record_response_unknown_question() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let err = record_response(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "q-bogus",
            "text",
            None,
            false,
        )
        .unwrap_err();

        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert!(err.to_string().contains("Unknown question"));
    }

    #[test]
    fn test_record_response_wrong_client() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let err = record_response(
            temp_dir.path(),
            &catalog,
            "client-2",
            &draft_id,
            "q-goal",
            "text",
            None,
            false,
        )
        .unwrap_err();

        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert!(err.to_string().contains("does not belong"));
    }

    #[test]
    fn test_record_response_after_finalize_fails() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = finalized_draft(temp_dir.path(), &catalog);

        let err = record_response(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "q-goal",
            "Too late",
            None,
            false,
        )
        .unwrap_err();

        assert!(matches!(err, WizardError::ValidationFailed(_)));
    }

    #[test]
    fn test_advance_requires_all_answers() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        record(temp_dir.path(), &catalog, &draft_id, "q-goal", "Grow sales");

        let err = advance_category(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert!(err.to_string().contains("1 unanswered"));

        // A blank answer does not count either
        record(temp_dir.path(), &catalog, &draft_id, "q-success", "   ");
        let err = advance_category(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap_err();
        assert!(err.to_string().contains("1 unanswered"));
    }

    #[test]
    fn test_advance_moves_to_next_category() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        record(temp_dir.path(), &catalog, &draft_id, "q-goal", "Grow sales");
        record(temp_dir.path(), &catalog, &draft_id, "q-success", "Signups");

        let outcome = advance_category(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();
        assert!(!outcome.is_complete);
        assert_eq!(outcome.draft.current_category, "budget");
        assert!(!outcome.draft.completed);
    }

    #[test]
    fn test_advance_on_last_category_finalizes() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        record(temp_dir.path(), &catalog, &draft_id, "q-goal", "Grow sales");
        record(temp_dir.path(), &catalog, &draft_id, "q-success", "Signups");
        advance_category(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();
        record(temp_dir.path(), &catalog, &draft_id, "q-budget", "About $4k");

        let outcome = advance_category(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();
        assert!(outcome.is_complete);
        assert!(outcome.draft.completed);
        assert_eq!(outcome.draft.stage(), WizardStage::ReadyToSubmit);
        assert!(outcome.draft.summary.is_some());
    }

    #[test]
    fn test_finalize_builds_summary_with_all_answers() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = finalized_draft(temp_dir.path(), &catalog);

        let detail = get_draft_detail(temp_dir.path(), CLIENT, &draft_id).unwrap();
        let summary = detail.draft.summary.unwrap();

        assert!(summary.contains("## Objectives"));
        assert!(summary.contains("Grow online sales"));
        assert!(summary.contains("More signups"));
        assert!(summary.contains("## Budget"));
        assert!(summary.contains("whatever you think is fair"));
    }

    #[test]
    fn test_finalize_happens_at_most_once() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = finalized_draft(temp_dir.path(), &catalog);

        let err = finalize(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert!(err.to_string().contains("Cannot finalize"));
    }

    #[test]
    fn test_finalize_with_unanswered_questions_fails() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        record(temp_dir.path(), &catalog, &draft_id, "q-goal", "Grow sales");

        let err = finalize(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert!(err.to_string().contains("2 unanswered"));

        // State unchanged: draft still in progress
        let detail = get_draft_detail(temp_dir.path(), CLIENT, &draft_id).unwrap();
        assert!(!detail.draft.completed);
    }

    #[test]
    fn test_submit_creates_brief_with_fallback_fields() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = finalized_draft(temp_dir.path(), &catalog);

        let before = Utc::now();
        let brief = submit(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "Logo redesign",
            "design",
        )
        .unwrap();

        assert_eq!(brief.title, "Logo redesign");
        assert_eq!(brief.category, "design");
        // The budget answer named no figure, so the fallback applies
        assert_eq!(brief.budget, "To be determined");
        // No timeline category in this catalog: deadline defaults to +30 days
        let deadline = DateTime::parse_from_rfc3339(&brief.deadline).unwrap();
        let days_out = (deadline.with_timezone(&Utc) - before).num_days();
        assert!((29..=30).contains(&days_out), "deadline {} days out", days_out);

        // Draft now points at the brief
        let detail = get_draft_detail(temp_dir.path(), CLIENT, &draft_id).unwrap();
        assert_eq!(detail.draft.submitted_brief_id.as_deref(), Some(brief.id.as_str()));
        assert_eq!(detail.draft.stage(), WizardStage::Submitted);
        assert_eq!(detail.draft.title.as_deref(), Some("Logo redesign"));

        // And the brief is retrievable
        let briefs = list_briefs(temp_dir.path(), CLIENT).unwrap();
        assert_eq!(briefs.len(), 1);
        assert_eq!(briefs[0].id, brief.id);
    }

    #[test]
    fn test_submit_carries_parseable_budget() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        record(temp_dir.path(), &catalog, &draft_id, "q-goal", "Grow sales");
        record(temp_dir.path(), &catalog, &draft_id, "q-success", "Signups");
        record(
            temp_dir.path(),
            &catalog,
            &draft_id,
            "q-budget",
            "$3,000 - $5,000",
        );
        finalize(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();

        let brief = submit(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "Logo redesign",
            "design",
        )
        .unwrap();

        assert_eq!(brief.budget, "$3,000 - $5,000");
    }

    #[test]
    fn test_submit_rejects_blank_title_and_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = finalized_draft(temp_dir.path(), &catalog);

        let err = submit(temp_dir.path(), &catalog, CLIENT, &draft_id, "  ", "design").unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert!(err.to_string().contains("Title"));

        assert!(list_briefs(temp_dir.path(), CLIENT).unwrap().is_empty());

        // Draft remains submittable
        let detail = get_draft_detail(temp_dir.path(), CLIENT, &draft_id).unwrap();
        assert_eq!(detail.draft.stage(), WizardStage::ReadyToSubmit);
    }

    #[test]
    fn test_submit_rejects_blank_category() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = finalized_draft(temp_dir.path(), &catalog);

        let err = submit(temp_dir.path(), &catalog, CLIENT, &draft_id, "Logo", "").unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert!(err.to_string().contains("Category"));
    }

    #[test]
    fn test_submit_before_finalize_fails() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let err = submit(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "Logo redesign",
            "design",
        )
        .unwrap_err();

        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert!(err.to_string().contains("Cannot submit"));
    }

    #[test]
    fn test_submit_happens_at_most_once() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = finalized_draft(temp_dir.path(), &catalog);

        submit(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "Logo redesign",
            "design",
        )
        .unwrap();

        let err = submit(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "Logo redesign",
            "design",
        )
        .unwrap_err();

        assert!(matches!(err, WizardError::ValidationFailed(_)));
        assert_eq!(list_briefs(temp_dir.path(), CLIENT).unwrap().len(), 1);
    }

    #[test]
    fn test_suggestion_for_question() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let text = suggestion_for(
            temp_dir.path(),
            &catalog,
            &StaticSuggestionProvider,
            CLIENT,
            &draft_id,
            "q-goal",
        )
        .unwrap();

        assert!(!text.trim().is_empty());
    }

    #[test]
    fn test_suggestion_unavailable_on_provider_error() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let err = suggestion_for(
            temp_dir.path(),
            &catalog,
            &FailingProvider,
            CLIENT,
            &draft_id,
            "q-goal",
        )
        .unwrap_err();
        assert!(matches!(err, WizardError::SuggestionUnavailable(_)));

        let err = suggestion_for(
            temp_dir.path(),
            &catalog,
            &SilentProvider,
            CLIENT,
            &draft_id,
            "q-goal",
        )
        .unwrap_err();
        assert!(matches!(err, WizardError::SuggestionUnavailable(_)));
    }

    #[test]
    fn test_wizard_completes_without_suggestions() {
        // A dead provider never blocks progress: the flow below never
        // consults it and completes on user-entered text alone
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let suggestions = category_suggestions(
            temp_dir.path(),
            &catalog,
            &FailingProvider,
            CLIENT,
            &draft_id,
            "objectives",
        )
        .unwrap();
        assert!(suggestions.is_empty());

        record(temp_dir.path(), &catalog, &draft_id, "q-goal", "Grow sales");
        record(temp_dir.path(), &catalog, &draft_id, "q-success", "Signups");
        advance_category(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();
        record(temp_dir.path(), &catalog, &draft_id, "q-budget", "$4k");
        let outcome = advance_category(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();

        assert!(outcome.is_complete);

        let responses = list_responses(temp_dir.path(), CLIENT, &draft_id).unwrap();
        assert!(responses.iter().all(|r| r.ai_suggested_text.is_none()));
    }

    #[test]
    fn test_category_suggestions_with_static_provider() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let suggestions = category_suggestions(
            temp_dir.path(),
            &catalog,
            &StaticSuggestionProvider,
            CLIENT,
            &draft_id,
            "objectives",
        )
        .unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].question_id, "q-goal");
    }

    #[test]
    fn test_progress_counts() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let empty = progress(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();
        assert_eq!(empty.answered, 0);
        assert_eq!(empty.total, 3);
        assert_eq!(empty.percent, 0);

        record(temp_dir.path(), &catalog, &draft_id, "q-goal", "Grow sales");

        let partial = progress(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();
        assert_eq!(partial.answered, 1);
        assert_eq!(partial.percent, 33);
        assert_eq!(partial.current_category, "objectives");
        assert_eq!(partial.categories.len(), 2);
        assert_eq!(partial.categories[0].answered, 1);
        assert!(!partial.categories[0].complete);

        record(temp_dir.path(), &catalog, &draft_id, "q-success", "Signups");
        record(temp_dir.path(), &catalog, &draft_id, "q-budget", "$4k");

        let full = progress(temp_dir.path(), &catalog, CLIENT, &draft_id).unwrap();
        assert_eq!(full.percent, 100);
        assert!(full.categories.iter().all(|c| c.complete));
    }

    #[test]
    fn test_get_active_draft() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();

        assert!(get_active_draft(temp_dir.path(), CLIENT).unwrap().is_none());

        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;
        let active = get_active_draft(temp_dir.path(), CLIENT).unwrap().unwrap();
        assert_eq!(active.draft.id, draft_id);
    }

    #[test]
    fn test_delete_draft_allows_restart() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        record(temp_dir.path(), &catalog, &draft_id, "q-goal", "Grow sales");
        let deleted = delete_draft(temp_dir.path(), CLIENT, &draft_id).unwrap();
        assert_eq!(deleted.id, draft_id);

        // Responses went with the draft
        let err = list_responses(temp_dir.path(), CLIENT, &draft_id).unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));

        let outcome = start(temp_dir.path(), &catalog, CLIENT).unwrap();
        assert!(!outcome.resumed);
        assert_ne!(outcome.draft.id, draft_id);
    }

    #[test]
    fn test_delete_draft_wrong_client() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = start(temp_dir.path(), &catalog, CLIENT).unwrap().draft.id;

        let err = delete_draft(temp_dir.path(), "client-2", &draft_id).unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));

        // Still there for its owner
        get_draft_detail(temp_dir.path(), CLIENT, &draft_id).unwrap();
    }

    #[test]
    fn test_get_brief_checks_ownership() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = test_catalog();
        let draft_id = finalized_draft(temp_dir.path(), &catalog);

        let brief = submit(
            temp_dir.path(),
            &catalog,
            CLIENT,
            &draft_id,
            "Logo redesign",
            "design",
        )
        .unwrap();

        let loaded = get_brief(temp_dir.path(), CLIENT, &brief.id).unwrap();
        assert_eq!(loaded.id, brief.id);

        let err = get_brief(temp_dir.path(), "client-2", &brief.id).unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));

        let err = get_brief(temp_dir.path(), CLIENT, "nonexistent").unwrap_err();
        assert!(matches!(err, WizardError::ValidationFailed(_)));
    }
}
