// Question catalog models shared by the wizard and the catalog loader

use serde::{Deserialize, Serialize};

/// Input control a question is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "textarea" => Ok(FieldType::Textarea),
            "select" => Ok(FieldType::Select),
            _ => Err(format!(
                "Unknown field type: '{}'. Expected one of: text, textarea, select",
                s
            )),
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Text
    }
}

/// A named grouping of catalog questions, presented as one wizard step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCategory {
    /// Stable key ("objectives", "budget", ...)
    pub name: String,
    /// Heading shown to the client
    pub title: String,
    /// Position among categories, ascending
    pub order: u32,
}

/// One question in the brief intake catalog
///
/// Catalog data is immutable at runtime: created by operators, read-only
/// to the wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique identifier for the question
    pub id: String,
    /// The question text shown to the client
    pub text: String,
    /// Name of the category this question belongs to
    pub category: String,
    /// Position within the category, ascending
    pub order_in_category: u32,
    /// Placeholder text for the empty input
    pub placeholder: Option<String>,
    /// Helper text shown beneath the input
    pub help_text: Option<String>,
    /// Input control to render
    pub field_type: FieldType,
    /// Choices for select questions
    pub options: Option<Vec<String>>,
}
