//! Server application state shared across handlers

use super::events::EventBroadcaster;
use crate::catalog::QuestionCatalog;
use crate::shutdown::ShutdownState;
use crate::suggestions::SuggestionProvider;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state for the server: storage location, the loaded question
/// catalog, and the services every request handler needs.
#[derive(Clone)]
pub struct ServerAppState {
    /// Authentication token for this server instance
    pub auth_token: String,

    /// Root of the file storage tree (drafts/ and briefs/ live below it)
    pub data_dir: PathBuf,

    /// Question catalog, loaded once at startup
    pub catalog: Arc<QuestionCatalog>,

    /// Suggestion provider for AI-assisted answers
    pub suggestions: Arc<dyn SuggestionProvider>,

    /// Event broadcaster for WebSocket clients
    pub broadcaster: Arc<EventBroadcaster>,

    /// Shutdown state
    pub shutdown_state: ShutdownState,
}

impl ServerAppState {
    /// Create a new server application state
    pub fn new(
        auth_token: String,
        data_dir: PathBuf,
        catalog: QuestionCatalog,
        suggestions: Arc<dyn SuggestionProvider>,
        shutdown_state: ShutdownState,
    ) -> Self {
        Self {
            auth_token,
            data_dir,
            catalog: Arc::new(catalog),
            suggestions,
            broadcaster: Arc::new(EventBroadcaster::new()),
            shutdown_state,
        }
    }
}
