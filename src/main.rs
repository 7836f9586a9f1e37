//! proCloud briefs server binary
//!
//! Hosts the brief submission wizard backend for the proCloud web frontend.

use anyhow::Result;
use clap::Parser;
use procloud_briefs_lib::catalog::QuestionCatalog;
use procloud_briefs_lib::config::{self, BriefsConfig};
use procloud_briefs_lib::file_storage;
use procloud_briefs_lib::server::{generate_auth_token, run_server, ServerAppState};
use procloud_briefs_lib::shutdown::{register_signal_handlers, ShutdownState};
use procloud_briefs_lib::suggestions::StaticSuggestionProvider;
use std::path::PathBuf;
use std::sync::Arc;

/// Brief intake server for the proCloud freelance marketplace
#[derive(Parser, Debug)]
#[command(name = "procloud-briefs", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PROCLOUD_BRIEFS_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(long, env = "PROCLOUD_BRIEFS_BIND")]
    bind: Option<String>,

    /// Data directory for drafts and briefs
    #[arg(long, env = "PROCLOUD_BRIEFS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, env = "PROCLOUD_BRIEFS_CONFIG")]
    config: Option<PathBuf>,

    /// Auth token for API access; a random token is generated when omitted
    #[arg(long, env = "PROCLOUD_BRIEFS_TOKEN")]
    token: Option<String>,

    /// Allowed CORS origins (comma separated); empty allows any origin
    #[arg(long, env = "PROCLOUD_BRIEFS_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Option<Vec<String>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Priority: CLI flags -> config file -> defaults
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let mut config = BriefsConfig::load_or_default(&config_path)?;
    config.apply_cli_overrides(cli.port, cli.bind, cli.data_dir, cli.cors_origins);

    let data_dir = config
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(file_storage::default_data_dir);

    file_storage::init_data_dir(&data_dir).map_err(anyhow::Error::msg)?;

    // Held for the lifetime of the server; a second instance on the same
    // data directory fails at startup
    let _lock = file_storage::acquire_lock(&data_dir).map_err(anyhow::Error::msg)?;

    procloud_briefs_lib::recover_indexes(&data_dir);

    let catalog = QuestionCatalog::load(&data_dir);
    log::info!(
        "Catalog loaded: {} categories, {} questions",
        catalog.categories().len(),
        catalog.total_questions()
    );

    let auth_token = cli.token.unwrap_or_else(generate_auth_token);

    let shutdown_state = ShutdownState::new();
    register_signal_handlers(shutdown_state.clone())?;

    let state = ServerAppState::new(
        auth_token,
        data_dir,
        catalog,
        Arc::new(StaticSuggestionProvider),
        shutdown_state.clone(),
    );

    run_server(
        config.server.port,
        &config.server.bind,
        state,
        &config.server.cors_origins,
    )
    .await
    .map_err(anyhow::Error::msg)?;

    shutdown_state.mark_cleanup_complete();
    log::info!("Server stopped");

    Ok(())
}
