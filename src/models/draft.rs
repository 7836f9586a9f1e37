// Draft and response models
//
// Timestamps are RFC 3339 strings; IDs are UUID v4 strings.

use super::state_machine::WizardStage;
use serde::{Deserialize, Serialize};

/// An in-progress, not-yet-submitted brief under construction by one client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    /// The client this draft belongs to. Every operation receives the
    /// caller's client id explicitly and is checked against this field.
    pub client_id: String,
    /// Working title, set at submit time
    pub title: Option<String>,
    /// Category the wizard currently sits on
    pub current_category: String,
    /// Set exactly once, when a summary has been generated
    pub completed: bool,
    /// Generated summary; non-empty whenever `completed` is true
    pub summary: Option<String>,
    /// Id of the brief this draft was submitted as, once it has been
    pub submitted_brief_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Draft {
    /// Wizard stage derived from the typed fields
    pub fn stage(&self) -> WizardStage {
        if self.submitted_brief_id.is_some() {
            WizardStage::Submitted
        } else if self.completed {
            WizardStage::ReadyToSubmit
        } else {
            WizardStage::InProgress
        }
    }

    /// An open draft is one still counted against the one-draft-per-client
    /// constraint: neither completed nor submitted
    pub fn is_open(&self) -> bool {
        !self.completed && self.submitted_brief_id.is_none()
    }
}

/// A client's answer to one catalog question within one draft
///
/// At most one response exists per (draft, question) pair; re-recording
/// replaces the previous one (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    pub draft_id: String,
    pub question_id: String,
    pub response_text: String,
    /// Text the suggestion provider offered for this question, if any
    pub ai_suggested_text: Option<String>,
    /// Whether the client accepted the suggestion verbatim
    pub used_suggestion: bool,
    pub updated_at: String,
}

/// Draft plus its recorded responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDetail {
    pub draft: Draft,
    pub responses: Vec<Response>,
}

/// Minimal draft info for listings, also stored as the index entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: String,
    pub client_id: String,
    pub title: Option<String>,
    pub current_category: String,
    pub completed: bool,
    pub submitted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl DraftSummary {
    pub fn is_open(&self) -> bool {
        !self.completed && !self.submitted
    }
}

/// Per-category completion counts for the progress report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub category: String,
    pub title: String,
    pub answered: usize,
    pub total: usize,
    pub complete: bool,
}

/// Overall wizard progress for one draft
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    pub draft_id: String,
    pub current_category: String,
    pub categories: Vec<CategoryProgress>,
    pub answered: usize,
    pub total: usize,
    /// 0-100, answered questions over catalog size
    pub percent: u8,
}

/// A previously answered (question, response) pair handed to the
/// suggestion provider as context
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question_id: String,
    pub question_text: String,
    pub response_text: String,
}
