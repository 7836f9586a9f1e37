// Submitted brief models

use serde::{Deserialize, Serialize};

/// The finalized, persisted record created once a draft's Q&A has been
/// summarized and confirmed by the client. Independent lifecycle from the
/// draft it came from; agency review happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBrief {
    pub id: String,
    pub client_id: String,
    pub title: String,
    /// Generated summary of all question/answer pairs
    pub summary_text: String,
    /// Extracted from budget-category answers, or "To be determined"
    pub budget: String,
    /// RFC 3339; extracted from timeline-category answers, or now + 30 days
    pub deadline: String,
    /// Service category the client filed the brief under
    pub category: String,
    pub created_at: String,
}

/// Minimal brief info for listings, also stored as the index entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefSummary {
    pub id: String,
    pub client_id: String,
    pub title: String,
    pub category: String,
    pub created_at: String,
}

impl SubmittedBrief {
    pub fn to_summary(&self) -> BriefSummary {
        BriefSummary {
            id: self.id.clone(),
            client_id: self.client_id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            created_at: self.created_at.clone(),
        }
    }
}
