//! Server-side configuration file.
//!
//! Reads `/etc/dbcred/<context>.toml`, or any path given directly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Which KV medium holds the role records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Redb,
    Memory,
}

/// Which database dialect role templates are tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    #[default]
    Postgres,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for on-disk state.
    pub data_dir: String,

    /// Explicit redb file; defaults to `{data_dir}/data.redb`.
    #[serde(default)]
    pub db_path: Option<String>,

    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub driver: Driver,

    /// Connection URL for postgres, file path for sqlite.
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub prepare_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    4
}

fn default_timeout_secs() -> u64 {
    5
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn prepare_timeout(&self) -> Duration {
        Duration::from_secs(self.prepare_timeout_secs)
    }
}

/// Full server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Resolve a context name or path to a config file.
    ///
    /// Anything containing `/` or `.` is taken as a path; a bare name maps to
    /// `/etc/dbcred/<name>.toml`.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/dbcred/{}.toml", name_or_path))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: ServerConfig = toml::from_str(content)?;
        Ok(config)
    }
}
