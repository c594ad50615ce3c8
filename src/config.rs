//! Explorer configuration, persisted as TOML.
//!
//! Lookup order: an explicit path, then `$XDG_CONFIG_HOME/mcp-explorer/config.toml`
//! if it exists, then built-in defaults. Every field has a default, so a
//! partial file is valid.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::debounce::DEFAULT_QUIET_PERIOD;
use crate::error::{ConfigError, ConfigResult};
use crate::loader::DataSource;
use crate::paths::ExplorerPaths;
use crate::query::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Client records: file path or http(s) URL.
    #[serde(default = "default_clients")]
    pub clients: String,
    /// Server records: file path or http(s) URL.
    #[serde(default = "default_servers")]
    pub servers: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Quiet period for debounced search input, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Length of the "top by stars" list.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_clients() -> String {
    "mcpso_clients_cleaned.json".into()
}
fn default_servers() -> String {
    "mcpso_servers_cleaned.json".into()
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_debounce_ms() -> u64 {
    DEFAULT_QUIET_PERIOD.as_millis() as u64
}
fn default_top_n() -> usize {
    10
}
fn default_bind() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            clients: default_clients(),
            servers: default_servers(),
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            top_n: default_top_n(),
            server: ServerConfig::default(),
        }
    }
}

impl ExplorerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    fn from_toml(content: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load `explicit` if given, else the XDG config file if present, else
    /// defaults.
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(paths) = ExplorerPaths::resolve() {
            let path = paths.config_file();
            if path.is_file() {
                tracing::debug!(path = %path.display(), "using config file");
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "(in memory)".into(),
            message: e.to_string(),
        })
    }

    pub fn clients_source(&self) -> DataSource {
        DataSource::parse(&self.clients)
    }

    pub fn servers_source(&self) -> DataSource {
        DataSource::parse(&self.servers)
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
