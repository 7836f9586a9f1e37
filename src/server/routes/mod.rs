//! Command routing modules
//!
//! This module organizes command routing into focused sub-modules by domain:
//! - wizard_routes: Brief submission wizard commands
//! - draft_routes: Draft management commands
//! - catalog_routes: Question catalog commands
//! - brief_routes: Submitted brief commands

pub mod brief_routes;
pub mod catalog_routes;
pub mod draft_routes;
pub mod wizard_routes;

use serde_json::Value;

use super::ServerAppState;

// =============================================================================
// Helper functions for use by route modules
// =============================================================================

/// Extract a required argument from JSON args
pub fn get_arg<T: serde::de::DeserializeOwned>(args: &Value, name: &str) -> Result<T, String> {
    serde_json::from_value(
        args.get(name)
            .ok_or_else(|| format!("Missing argument: {}", name))?
            .clone(),
    )
    .map_err(|e| format!("Invalid argument {}: {}", name, e))
}

/// Extract an optional argument from JSON args
pub fn get_opt_arg<T: serde::de::DeserializeOwned>(
    args: &Value,
    name: &str,
) -> Result<Option<T>, String> {
    match args.get(name) {
        Some(v) if !v.is_null() => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| format!("Invalid argument {}: {}", name, e)),
        _ => Ok(None),
    }
}

/// Extract the caller's client id
///
/// A missing or null clientId comes back as an empty string so the wizard
/// layer reports it as an authentication failure rather than a missing
/// argument.
pub fn get_client_id(args: &Value) -> Result<String, String> {
    Ok(get_opt_arg::<String>(args, "clientId")?.unwrap_or_default())
}

// =============================================================================
// Command Routing Macros
// =============================================================================

/// Routes a simple async command: awaits the handler, serializes the result
#[macro_export]
macro_rules! route_async {
    ($cmd:expr, $handler:expr) => {{
        let result = $handler.await?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }};
}

/// Routes a sync command
#[macro_export]
macro_rules! route_sync {
    ($handler:expr) => {{
        let result = $handler?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }};
}

// Re-export macros for use in route modules
pub use route_async;
pub use route_sync;

// =============================================================================
// Main Command Dispatcher
// =============================================================================

/// Route a command to its implementation by dispatching to the appropriate sub-router
pub async fn route_command(
    cmd: &str,
    args: Value,
    state: &ServerAppState,
) -> Result<Value, String> {
    if wizard_routes::is_wizard_command(cmd) {
        return wizard_routes::route_wizard_command(cmd, args, state).await;
    }

    if draft_routes::is_draft_command(cmd) {
        return draft_routes::route_draft_command(cmd, args, state).await;
    }

    if catalog_routes::is_catalog_command(cmd) {
        return catalog_routes::route_catalog_command(cmd, args, state).await;
    }

    if brief_routes::is_brief_command(cmd) {
        return brief_routes::route_brief_command(cmd, args, state).await;
    }

    Err(format!("Unknown command: {}", cmd))
}
