// Question catalog: the ordered categories and questions the wizard walks through.
//
// A deployment can replace the built-in catalog by dropping a catalog.toml into
// the data directory. An override that fails validation is logged and ignored
// so the server always comes up with a usable catalog.

mod builtin;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::models::{CatalogCategory, FieldType, Question};

pub const CATALOG_OVERRIDE_FILE: &str = "catalog.toml";

#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    categories: Vec<CatalogCategory>,
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Catalog shipped with the server.
    pub fn builtin() -> Self {
        let mut categories = builtin::builtin_categories();
        let mut questions = builtin::builtin_questions();
        sort_catalog(&mut categories, &mut questions);
        QuestionCatalog {
            categories,
            questions,
        }
    }

    /// Build a catalog from raw parts, validating cross-references.
    pub fn from_parts(
        categories: Vec<CatalogCategory>,
        questions: Vec<Question>,
    ) -> Result<Self> {
        if categories.is_empty() {
            bail!("Catalog must define at least one category");
        }

        let mut seen_categories: Vec<&str> = Vec::new();
        for category in &categories {
            if category.name.trim().is_empty() {
                bail!("Catalog category with empty name");
            }
            if seen_categories.contains(&category.name.as_str()) {
                bail!("Duplicate catalog category: {}", category.name);
            }
            seen_categories.push(&category.name);
        }

        let mut seen_questions: Vec<&str> = Vec::new();
        for question in &questions {
            if question.id.trim().is_empty() {
                bail!("Catalog question with empty id");
            }
            if seen_questions.contains(&question.id.as_str()) {
                bail!("Duplicate catalog question: {}", question.id);
            }
            seen_questions.push(&question.id);

            if !seen_categories.contains(&question.category.as_str()) {
                bail!(
                    "Question {} references unknown category: {}",
                    question.id,
                    question.category
                );
            }
            if question.field_type == FieldType::Select
                && question.options.as_ref().map_or(true, |o| o.is_empty())
            {
                bail!("Select question {} has no options", question.id);
            }
        }

        let mut categories = categories;
        let mut questions = questions;
        sort_catalog(&mut categories, &mut questions);
        Ok(QuestionCatalog {
            categories,
            questions,
        })
    }

    /// Load the catalog for a data directory, preferring the override file.
    pub fn load(data_dir: &Path) -> Self {
        let override_path = data_dir.join(CATALOG_OVERRIDE_FILE);
        if override_path.exists() {
            match Self::load_override(&override_path) {
                Ok(catalog) => {
                    log::info!(
                        "Loaded catalog override from {} ({} categories, {} questions)",
                        override_path.display(),
                        catalog.categories.len(),
                        catalog.questions.len()
                    );
                    return catalog;
                }
                Err(e) => {
                    log::error!(
                        "Ignoring invalid catalog override {}: {:#}",
                        override_path.display(),
                        e
                    );
                }
            }
        }
        Self::builtin()
    }

    fn load_override(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let parsed: CatalogOverride = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let categories = parsed
            .categories
            .into_iter()
            .map(|c| CatalogCategory {
                name: c.name,
                title: c.title,
                order: c.order,
            })
            .collect();
        let questions = parsed
            .questions
            .into_iter()
            .map(|q| Question {
                id: q.id,
                text: q.text,
                category: q.category,
                order_in_category: q.order_in_category,
                placeholder: q.placeholder,
                help_text: q.help_text,
                field_type: q.field_type,
                options: q.options,
            })
            .collect();
        Self::from_parts(categories, questions)
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn first_category(&self) -> Option<&str> {
        self.categories.first().map(|c| c.name.as_str())
    }

    pub fn category(&self, name: &str) -> Option<&CatalogCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Category that follows `name` in wizard order, None when `name` is last
    /// or unknown.
    pub fn category_after(&self, name: &str) -> Option<&str> {
        let position = self.categories.iter().position(|c| c.name == name)?;
        self.categories
            .get(position + 1)
            .map(|c| c.name.as_str())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn questions_for_category(&self, name: &str) -> Vec<Question> {
        let mut questions: Vec<Question> = self
            .questions
            .iter()
            .filter(|q| q.category == name)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.order_in_category);
        questions
    }
}

fn sort_catalog(categories: &mut [CatalogCategory], questions: &mut [Question]) {
    categories.sort_by_key(|c| c.order);
    let category_order: HashMap<&str, u32> = categories
        .iter()
        .map(|c| (c.name.as_str(), c.order))
        .collect();
    questions.sort_by_key(|q| {
        (
            category_order.get(q.category.as_str()).copied().unwrap_or(u32::MAX),
            q.order_in_category,
        )
    });
}

#[derive(Debug, Deserialize)]
struct CatalogOverride {
    #[serde(default)]
    categories: Vec<CategoryOverride>,
    #[serde(default)]
    questions: Vec<QuestionOverride>,
}

#[derive(Debug, Deserialize)]
struct CategoryOverride {
    name: String,
    title: String,
    order: u32,
}

#[derive(Debug, Deserialize)]
struct QuestionOverride {
    id: String,
    text: String,
    category: String,
    order_in_category: u32,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    help_text: Option<String>,
    #[serde(default)]
    field_type: FieldType,
    #[serde(default)]
    options: Option<Vec<String>>,
}
