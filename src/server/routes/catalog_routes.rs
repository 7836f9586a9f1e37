//! Question catalog command routing
//!
//! Handles: get_catalog, get_categories

use crate::commands;
use serde_json::Value;

use super::{route_sync, ServerAppState};

/// Route catalog commands
pub async fn route_catalog_command(
    cmd: &str,
    _args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    match cmd {
        "get_catalog" => route_sync!(commands::catalog::get_catalog(&state.catalog)),
        "get_categories" => route_sync!(commands::catalog::get_categories(&state.catalog)),
        _ => Err(format!("Unknown catalog command: {}", cmd)),
    }
}

/// Check if a command is a catalog command
pub fn is_catalog_command(cmd: &str) -> bool {
    matches!(cmd, "get_catalog" | "get_categories")
}
