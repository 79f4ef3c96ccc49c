//! Server configuration
//!
//! Settings come from an optional JSON file, then environment variables
//! override individual fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{env, hosts, paths, ports};

/// Runtime settings for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind (0 picks a free port)
    pub port: u16,
    /// Start with the two sample workflows instead of an empty store
    pub seed_samples: bool,
    /// Answer cross-origin requests from any origin
    pub cors_allow_any: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: hosts::LOCAL.to_string(),
            port: ports::SERVER,
            seed_samples: true,
            cors_allow_any: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; fields absent from the file keep
    /// their default values.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await.map_err(ConfigError::Io)?;

        let config = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Resolve configuration from the process environment: the file named
    /// by `FLOWBUILDER_CONFIG` (or `flowbuilder.json`), then host and port
    /// overrides.
    pub async fn from_env() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();
        let path = lookup(env::CONFIG)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(paths::CONFIG_FILE));

        let mut config = Self::load(&path).await?;
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Apply `FLOWBUILDER_HOST` / `FLOWBUILDER_PORT` values from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(env::HOST).filter(|h| !h.trim().is_empty()) {
            self.host = host;
        }
        if let Some(port) = lookup(env::PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        Ok(())
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("Invalid port: {0}")]
    InvalidPort(String),
}
