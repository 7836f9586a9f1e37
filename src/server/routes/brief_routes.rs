//! Submitted brief command routing
//!
//! Handles: get_briefs, get_brief

use crate::commands;
use serde_json::Value;

use super::{get_arg, get_client_id, route_async, ServerAppState};

/// Route submitted brief commands
pub async fn route_brief_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    match cmd {
        "get_briefs" => {
            let client_id = get_client_id(&args)?;
            route_async!(cmd, commands::briefs::get_briefs(&state.data_dir, client_id))
        }

        "get_brief" => {
            let client_id = get_client_id(&args)?;
            let brief_id: String = get_arg(&args, "briefId")?;
            route_async!(
                cmd,
                commands::briefs::get_brief(&state.data_dir, client_id, brief_id)
            )
        }

        _ => Err(format!("Unknown brief command: {}", cmd)),
    }
}

/// Check if a command is a submitted brief command
pub fn is_brief_command(cmd: &str) -> bool {
    matches!(cmd, "get_briefs" | "get_brief")
}
