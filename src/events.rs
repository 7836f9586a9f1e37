// Event types and payload structures for real-time updates
// These are broadcast via WebSocket to connected clients

use crate::models::{Draft, SubmittedBrief};
use serde::{Deserialize, Serialize};

// Event name constants
pub const EVENT_DRAFT_CREATED: &str = "draft:created";
pub const EVENT_RESPONSE_RECORDED: &str = "draft:response_recorded";
pub const EVENT_CATEGORY_ADVANCED: &str = "draft:category_advanced";
pub const EVENT_DRAFT_FINALIZED: &str = "draft:finalized";
pub const EVENT_DRAFT_DELETED: &str = "draft:deleted";
pub const EVENT_BRIEF_SUBMITTED: &str = "brief:submitted";

/// Payload for draft lifecycle events (created, advanced, finalized, deleted)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEventPayload {
    pub draft_id: String,
    pub client_id: String,
    pub current_category: String,
    pub stage: String,
}

impl DraftEventPayload {
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            draft_id: draft.id.clone(),
            client_id: draft.client_id.clone(),
            current_category: draft.current_category.clone(),
            stage: draft.stage().to_string(),
        }
    }
}

/// Payload for response recorded events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecordedPayload {
    pub draft_id: String,
    pub client_id: String,
    pub question_id: String,
    pub used_suggestion: bool,
}

/// Payload for brief submitted events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefSubmittedPayload {
    pub brief_id: String,
    pub draft_id: String,
    pub client_id: String,
    pub title: String,
    pub category: String,
}

impl BriefSubmittedPayload {
    pub fn from_brief(brief: &SubmittedBrief, draft_id: &str) -> Self {
        Self {
            brief_id: brief.id.clone(),
            draft_id: draft_id.to_string(),
            client_id: brief.client_id.clone(),
            title: brief.title.clone(),
            category: brief.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_event_payload_serializes_camel_case() {
        let payload = DraftEventPayload {
            draft_id: "d-1".to_string(),
            client_id: "c-1".to_string(),
            current_category: "objectives".to_string(),
            stage: "in_progress".to_string(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"draftId\":\"d-1\""));
        assert!(json.contains("\"currentCategory\":\"objectives\""));
    }

    #[test]
    fn test_brief_submitted_payload_from_brief() {
        let brief = SubmittedBrief {
            id: "b-1".to_string(),
            client_id: "c-1".to_string(),
            title: "Logo redesign".to_string(),
            summary_text: "## Objectives\n".to_string(),
            budget: "To be determined".to_string(),
            deadline: "2026-03-01T00:00:00Z".to_string(),
            category: "design".to_string(),
            created_at: "2026-01-30T00:00:00Z".to_string(),
        };

        let payload = BriefSubmittedPayload::from_brief(&brief, "d-1");
        assert_eq!(payload.brief_id, "b-1");
        assert_eq!(payload.draft_id, "d-1");
        assert_eq!(payload.category, "design");
    }
}
