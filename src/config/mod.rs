// Server configuration with priority merging
// Priority order: CLI -> config file -> defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default port for the briefs server
pub const DEFAULT_PORT: u16 = 4871;
/// Default bind address (loopback only)
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub bind: String,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

/// File storage settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; defaults to the platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

/// Top-level configuration for the briefs server
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BriefsConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl BriefsConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: BriefsConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    ///
    /// A present but unparseable file is an error, not a silent fallback.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply_cli_overrides(
        &mut self,
        port: Option<u16>,
        bind: Option<String>,
        data_dir: Option<PathBuf>,
        cors_origins: Option<Vec<String>>,
    ) {
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(bind) = bind {
            self.server.bind = bind;
        }
        if let Some(data_dir) = data_dir {
            self.storage.data_dir = Some(data_dir);
        }
        if let Some(origins) = cors_origins {
            self.server.cors_origins = origins;
        }
    }
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("procloud-briefs")
        .join("config.toml")
}
