//! XDG-compliant path resolution for mcp-explorer.

use std::path::PathBuf;

use crate::error::{PathError, PathResult};

const APP_DIR: &str = "mcp-explorer";

/// XDG directories for mcp-explorer.
#[derive(Debug, Clone)]
pub struct ExplorerPaths {
    /// `$XDG_CONFIG_HOME/mcp-explorer/`
    pub config_dir: PathBuf,
}

impl ExplorerPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| PathError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join(APP_DIR);

        Ok(Self { config_dir })
    }

    /// Create the config directory. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        std::fs::create_dir_all(&self.config_dir).map_err(|e| PathError::CreateDir {
            path: self.config_dir.display().to_string(),
            source: e,
        })
    }

    /// `config_dir/config.toml`
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}
