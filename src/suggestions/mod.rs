//! Answer suggestions for wizard questions
//!
//! The wizard can offer the client a draft answer to accept or edit. The
//! default provider is deterministic canned text per category, so the
//! wizard works without any external model. A model-backed provider
//! implements the same trait.

use crate::models::{AnsweredQuestion, Question};

/// Source of suggested answers for catalog questions
pub trait SuggestionProvider: Send + Sync {
    /// Suggest an answer for `question`. `prior` holds what the client has
    /// answered so far, in catalog order. `Ok(None)` means the provider has
    /// nothing to offer for this question.
    fn suggest(
        &self,
        question: &Question,
        prior: &[AnsweredQuestion],
    ) -> Result<Option<String>, String>;
}

const OBJECTIVES_SUGGESTION: &str = "We want to increase qualified leads from our website over \
the next two quarters. Success means a measurable lift in signups from organic traffic.";

const AUDIENCE_SUGGESTION: &str = "Small business owners aged 30-55 who handle their own \
marketing and value clear, practical communication.";

const SCOPE_SUGGESTION: &str = "A refreshed visual identity: logo, color palette and typography, \
plus templates for the most common touchpoints.";

const BUDGET_SUGGESTION: &str = "$2,000 - $5,000";

const TIMELINE_SUGGESTION: &str = "Delivery within 6 weeks, with a midpoint review.";

const GENERIC_SUGGESTION: &str = "Keep it specific: one or two sentences about what matters \
most for this part of the project.";

/// Deterministic provider with canned text per built-in category
pub struct StaticSuggestionProvider;

impl SuggestionProvider for StaticSuggestionProvider {
    fn suggest(
        &self,
        question: &Question,
        _prior: &[AnsweredQuestion],
    ) -> Result<Option<String>, String> {
        // Select questions get their first option
        if let Some(options) = &question.options {
            if let Some(first) = options.first() {
                return Ok(Some(first.clone()));
            }
        }

        let text = match question.category.as_str() {
            "objectives" => OBJECTIVES_SUGGESTION,
            "audience" => AUDIENCE_SUGGESTION,
            "scope" => SCOPE_SUGGESTION,
            "budget" => BUDGET_SUGGESTION,
            "timeline" => TIMELINE_SUGGESTION,
            _ => GENERIC_SUGGESTION,
        };

        Ok(Some(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuestionCatalog;

    #[test]
    fn test_static_provider_covers_builtin_catalog() {
        let catalog = QuestionCatalog::builtin();
        let provider = StaticSuggestionProvider;

        for question in catalog.questions() {
            let suggestion = provider.suggest(question, &[]).unwrap();
            assert!(
                suggestion.is_some(),
                "no suggestion for question {}",
                question.id
            );
            assert!(!suggestion.unwrap().trim().is_empty());
        }
    }

    #[test]
    fn test_select_question_gets_first_option() {
        let catalog = QuestionCatalog::builtin();
        let question = catalog.question("scope-format").unwrap();

        let suggestion = StaticSuggestionProvider.suggest(question, &[]).unwrap();
        assert_eq!(suggestion.as_deref(), Some("Web"));
    }

    #[test]
    fn test_unknown_category_gets_generic_text() {
        let question = Question {
            id: "x1".to_string(),
            text: "Anything else?".to_string(),
            category: "extras".to_string(),
            order_in_category: 0,
            placeholder: None,
            help_text: None,
            field_type: crate::models::FieldType::Text,
            options: None,
        };

        let suggestion = StaticSuggestionProvider.suggest(&question, &[]).unwrap();
        assert_eq!(suggestion.as_deref(), Some(GENERIC_SUGGESTION));
    }
}
