// Backend commands for the question catalog
//
// The catalog is loaded once at startup and shared read-only, so these
// commands never touch the filesystem.

use crate::catalog::QuestionCatalog;
use crate::models::{CatalogCategory, Question};
use serde::{Deserialize, Serialize};

/// Full catalog payload for clients that render the whole wizard upfront
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPayload {
    pub categories: Vec<CatalogCategory>,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Get the complete question catalog
pub fn get_catalog(catalog: &QuestionCatalog) -> Result<CatalogPayload, String> {
    Ok(CatalogPayload {
        categories: catalog.categories().to_vec(),
        questions: catalog.questions().to_vec(),
        total_questions: catalog.total_questions(),
    })
}

/// Get the ordered list of wizard categories
pub fn get_categories(catalog: &QuestionCatalog) -> Result<Vec<CatalogCategory>, String> {
    Ok(catalog.categories().to_vec())
}
