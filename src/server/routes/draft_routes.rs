//! Draft management command routing
//!
//! Handles: get_active_draft, get_drafts, get_draft, get_draft_responses,
//! delete_draft

use crate::commands;
use crate::events::{DraftEventPayload, EVENT_DRAFT_DELETED};
use serde_json::Value;

use super::{get_arg, get_client_id, route_async, ServerAppState};

/// Route draft management commands
pub async fn route_draft_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    match cmd {
        "get_active_draft" => {
            let client_id = get_client_id(&args)?;
            route_async!(
                cmd,
                commands::drafts::get_active_draft(&state.data_dir, client_id)
            )
        }

        "get_drafts" => {
            let client_id = get_client_id(&args)?;
            route_async!(cmd, commands::drafts::get_drafts(&state.data_dir, client_id))
        }

        "get_draft" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;
            route_async!(
                cmd,
                commands::drafts::get_draft(&state.data_dir, client_id, draft_id)
            )
        }

        "get_draft_responses" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;
            route_async!(
                cmd,
                commands::drafts::get_draft_responses(&state.data_dir, client_id, draft_id)
            )
        }

        "delete_draft" => {
            let client_id = get_client_id(&args)?;
            let draft_id: String = get_arg(&args, "draftId")?;

            let deleted =
                commands::drafts::delete_draft(&state.data_dir, client_id, draft_id).await?;

            state
                .broadcaster
                .broadcast(EVENT_DRAFT_DELETED, DraftEventPayload::from_draft(&deleted));

            serde_json::to_value(deleted).map_err(|e| e.to_string())
        }

        _ => Err(format!("Unknown draft command: {}", cmd)),
    }
}

/// Check if a command is a draft management command
pub fn is_draft_command(cmd: &str) -> bool {
    matches!(
        cmd,
        "get_active_draft" | "get_drafts" | "get_draft" | "get_draft_responses" | "delete_draft"
    )
}
