//! Configuration for the command-line front end
//!
//! Values come from `config.toml` in the user config directory (or an explicit
//! path), then `SHEETPUSH_*` environment variables (a `.env` file is honoured),
//! then command-line flags. The batch core never reads any of this directly; it
//! receives a resolved [`RunConfig`](crate::batch::RunConfig).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::batch::DEFAULT_ERROR_PREVIEW;

pub const ENDPOINT_ENV: &str = "SHEETPUSH_ENDPOINT";
pub const AUTH_TOKEN_ENV: &str = "SHEETPUSH_AUTH_TOKEN";

const APP_DIR: &str = "sheetpush";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub run: RunSettings,
}

/// Remote endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: Option<String>,
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth_token: None,
            timeout_secs: 30,
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Batch run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// File holding the operation document
    pub mutation_file: Option<PathBuf>,
    /// Row errors printed before collapsing the rest
    pub error_preview_limit: usize,
    /// 1 runs rows strictly one after another
    pub max_in_flight: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            mutation_file: None,
            error_preview_limit: DEFAULT_ERROR_PREVIEW,
            max_in_flight: 1,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/sheetpush/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, or the default path if it exists
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply `SHEETPUSH_ENDPOINT` / `SHEETPUSH_AUTH_TOKEN` overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(AUTH_TOKEN_ENV).ok(),
        );
    }

    /// Replace endpoint and token with any non-empty override
    pub fn apply_overrides(&mut self, endpoint: Option<String>, auth_token: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.remote.endpoint = Some(endpoint);
        }
        if let Some(token) = auth_token.filter(|t| !t.trim().is_empty()) {
            self.remote.auth_token = Some(token);
        }
    }
}
