// Backend command handlers for the command proxy

pub mod briefs;
pub mod catalog;
pub mod drafts;
pub mod wizard;

// Re-export all commands for easy registration
pub use briefs::*;
pub use catalog::*;
pub use drafts::*;
pub use wizard::*;
