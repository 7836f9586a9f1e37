// Data models matching the frontend TypeScript types

pub mod brief;
pub mod catalog;
pub mod draft;
pub mod state_machine;

pub use brief::{BriefSummary, SubmittedBrief};
pub use catalog::{CatalogCategory, FieldType, Question};
pub use draft::{
    AnsweredQuestion, CategoryProgress, Draft, DraftDetail, DraftSummary, Response, WizardProgress,
};
pub use state_machine::WizardStage;
