//! Summary generation and typed field extraction
//!
//! At finalize time the recorded answers are rendered into a markdown
//! summary grouped by category. At submit time the budget and deadline
//! fields of the brief are extracted from the relevant category answers,
//! with documented fallbacks when nothing usable was written.

use crate::catalog::QuestionCatalog;
use crate::models::Response;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Budget used when no currency amount can be read from the answers
pub const BUDGET_FALLBACK: &str = "To be determined";

/// Deadline applied when no timeframe can be read from the answers
pub const DEFAULT_DEADLINE_DAYS: i64 = 30;

/// Category whose answers are scanned for a budget figure
const BUDGET_CATEGORY: &str = "budget";

/// Category whose answers are scanned for a delivery timeframe
const TIMELINE_CATEGORY: &str = "timeline";

// Compiled regex patterns
static BUDGET_PATTERN: OnceLock<Regex> = OnceLock::new();
static TIMEFRAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn get_budget_pattern() -> &'static Regex {
    BUDGET_PATTERN.get_or_init(|| {
        Regex::new(
            r"[$€£]\s*\d[\d,]*(?:\.\d+)?\s*[kKmM]?(?:\s*(?:-|to)\s*[$€£]?\s*\d[\d,]*(?:\.\d+)?\s*[kKmM]?)?",
        )
        .unwrap()
    })
}

fn get_timeframe_pattern() -> &'static Regex {
    TIMEFRAME_PATTERN.get_or_init(|| Regex::new(r"(?i)(\d+)\s*(day|week|month)s?\b").unwrap())
}

/// Render all answers as a markdown document grouped by category
///
/// Blank answers are skipped; fails when nothing at all was answered.
pub fn generate_summary(
    catalog: &QuestionCatalog,
    responses: &[Response],
) -> Result<String, String> {
    let mut summary = String::new();
    let mut answered = 0usize;

    for category in catalog.categories() {
        let mut section = String::new();

        for question in catalog.questions_for_category(&category.name) {
            if let Some(response) = responses.iter().find(|r| r.question_id == question.id) {
                let answer = response.response_text.trim();
                if answer.is_empty() {
                    continue;
                }
                section.push_str(&format!("**{}**\n{}\n\n", question.text, answer));
                answered += 1;
            }
        }

        if !section.is_empty() {
            summary.push_str(&format!("## {}\n\n", category.title));
            summary.push_str(&section);
        }
    }

    if answered == 0 {
        return Err("No answers to summarize".to_string());
    }

    Ok(summary)
}

/// Pull a budget figure out of the budget-category answers
///
/// Only an explicit currency amount is carried into the brief. A free-text
/// answer that names no figure yields the fallback, which flags the budget
/// as unresolved for agency review.
pub fn extract_budget(catalog: &QuestionCatalog, responses: &[Response]) -> String {
    for question in catalog.questions_for_category(BUDGET_CATEGORY) {
        if let Some(response) = responses.iter().find(|r| r.question_id == question.id) {
            if let Some(found) = get_budget_pattern().find(&response.response_text) {
                return found.as_str().trim().to_string();
            }
        }
    }

    BUDGET_FALLBACK.to_string()
}

/// Work out a concrete deadline from the timeline-category answers
///
/// "6 weeks" style timeframes are taken relative to `now`; "asap" maps to
/// one week out. Anything else falls back to now + 30 days. Returns an
/// RFC 3339 timestamp.
pub fn extract_deadline(
    catalog: &QuestionCatalog,
    responses: &[Response],
    now: DateTime<Utc>,
) -> String {
    for question in catalog.questions_for_category(TIMELINE_CATEGORY) {
        if let Some(response) = responses.iter().find(|r| r.question_id == question.id) {
            if let Some(captures) = get_timeframe_pattern().captures(&response.response_text) {
                let amount: i64 = captures[1].parse().unwrap_or(0);
                if amount > 0 && amount < 10_000 {
                    let days = match captures[2].to_lowercase().as_str() {
                        "week" => amount * 7,
                        "month" => amount * 30,
                        _ => amount,
                    };
                    return (now + Duration::days(days)).to_rfc3339();
                }
            }

            if response.response_text.to_lowercase().contains("asap") {
                return (now + Duration::days(7)).to_rfc3339();
            }
        }
    }

    (now + Duration::days(DEFAULT_DEADLINE_DAYS)).to_rfc3339()
}
