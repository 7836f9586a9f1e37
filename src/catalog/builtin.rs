// Built-in question catalog used when no override file is present.

use crate::models::{CatalogCategory, FieldType, Question};

pub fn builtin_categories() -> Vec<CatalogCategory> {
    vec![
        CatalogCategory {
            name: "objectives".to_string(),
            title: "Objectives".to_string(),
            order: 0,
        },
        CatalogCategory {
            name: "audience".to_string(),
            title: "Audience".to_string(),
            order: 1,
        },
        CatalogCategory {
            name: "scope".to_string(),
            title: "Scope & Deliverables".to_string(),
            order: 2,
        },
        CatalogCategory {
            name: "budget".to_string(),
            title: "Budget".to_string(),
            order: 3,
        },
        CatalogCategory {
            name: "timeline".to_string(),
            title: "Timeline".to_string(),
            order: 4,
        },
    ]
}

pub fn builtin_questions() -> Vec<Question> {
    vec![
        Question {
            id: "obj-goal".to_string(),
            text: "What is the primary goal of this project?".to_string(),
            category: "objectives".to_string(),
            order_in_category: 0,
            placeholder: None,
            help_text: Some(
                "Describe the outcome you want, not the work itself. A launch, a rebrand, more signups."
                    .to_string(),
            ),
            field_type: FieldType::Textarea,
            options: None,
        },
        Question {
            id: "obj-success".to_string(),
            text: "How will you know the project succeeded?".to_string(),
            category: "objectives".to_string(),
            order_in_category: 1,
            placeholder: None,
            help_text: None,
            field_type: FieldType::Textarea,
            options: None,
        },
        Question {
            id: "aud-target".to_string(),
            text: "Who is the target audience?".to_string(),
            category: "audience".to_string(),
            order_in_category: 0,
            placeholder: None,
            help_text: Some("Age range, profession, interests, anything that narrows it down.".to_string()),
            field_type: FieldType::Textarea,
            options: None,
        },
        Question {
            id: "aud-tone".to_string(),
            text: "How should the work feel to that audience?".to_string(),
            category: "audience".to_string(),
            order_in_category: 1,
            placeholder: Some("e.g. premium, playful, minimal".to_string()),
            help_text: None,
            field_type: FieldType::Text,
            options: None,
        },
        Question {
            id: "scope-deliverables".to_string(),
            text: "What deliverables do you need?".to_string(),
            category: "scope".to_string(),
            order_in_category: 0,
            placeholder: None,
            help_text: Some("List everything you expect to receive at the end.".to_string()),
            field_type: FieldType::Textarea,
            options: None,
        },
        Question {
            id: "scope-existing".to_string(),
            text: "What existing materials or brand assets should be used?".to_string(),
            category: "scope".to_string(),
            order_in_category: 1,
            placeholder: None,
            help_text: None,
            field_type: FieldType::Textarea,
            options: None,
        },
        Question {
            id: "scope-format".to_string(),
            text: "Where will the work primarily be used?".to_string(),
            category: "scope".to_string(),
            order_in_category: 2,
            placeholder: None,
            help_text: None,
            field_type: FieldType::Select,
            options: Some(vec![
                "Web".to_string(),
                "Print".to_string(),
                "Social media".to_string(),
                "Multiple channels".to_string(),
            ]),
        },
        Question {
            id: "budget-range".to_string(),
            text: "What is your budget range for this project?".to_string(),
            category: "budget".to_string(),
            order_in_category: 0,
            placeholder: Some("e.g. $2,000 - $5,000".to_string()),
            help_text: Some("A range is fine. It helps freelancers scope realistic proposals.".to_string()),
            field_type: FieldType::Text,
            options: None,
        },
        Question {
            id: "time-deadline".to_string(),
            text: "When do you need the project delivered?".to_string(),
            category: "timeline".to_string(),
            order_in_category: 0,
            placeholder: Some("e.g. within 6 weeks".to_string()),
            help_text: None,
            field_type: FieldType::Text,
            options: None,
        },
        Question {
            id: "time-milestones".to_string(),
            text: "Are there interim milestones or review points?".to_string(),
            category: "timeline".to_string(),
            order_in_category: 1,
            placeholder: None,
            help_text: None,
            field_type: FieldType::Textarea,
            options: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories_ordered() {
        let categories = builtin_categories();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0].name, "objectives");
        assert_eq!(categories[4].name, "timeline");
        for (idx, category) in categories.iter().enumerate() {
            assert_eq!(category.order, idx as u32);
        }
    }

    #[test]
    fn test_builtin_questions_reference_builtin_categories() {
        let categories = builtin_categories();
        let questions = builtin_questions();
        assert!(!questions.is_empty());
        for question in &questions {
            assert!(
                categories.iter().any(|c| c.name == question.category),
                "question {} references unknown category {}",
                question.id,
                question.category
            );
        }
    }

    #[test]
    fn test_builtin_question_ids_unique() {
        let questions = builtin_questions();
        for (i, a) in questions.iter().enumerate() {
            for b in questions.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_select_questions_have_options() {
        for question in builtin_questions() {
            if question.field_type == FieldType::Select {
                let options = question.options.as_ref().unwrap();
                assert!(!options.is_empty());
            }
        }
    }
}
