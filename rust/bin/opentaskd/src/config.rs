//! Server configuration.
//!
//! Loaded from a TOML file. A bare context name resolves to
//! `/etc/opentask/<name>.toml`; anything containing `/` or `.` is used
//! as a path directly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use opentask_doc::sqlite::{
    ConnectOptions, DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MAX_POOL_SIZE, DEFAULT_MIN_POOL_SIZE,
};

/// Server configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_listen")]
    pub listen: String,

    pub storage: StorageConfig,

    pub api: ApiConfig,
}

/// Storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Database URL (e.g. "sqlite:///var/lib/opentask/tasks.db").
    pub database_url: String,

    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,

    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// API access settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Static API key callers must present in the `authorization` header.
    pub secret: String,
}

fn default_listen() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_min_pool_size() -> u32 {
    DEFAULT_MIN_POOL_SIZE
}

fn default_max_pool_size() -> u32 {
    DEFAULT_MAX_POOL_SIZE
}

fn default_acquire_timeout_secs() -> u64 {
    DEFAULT_ACQUIRE_TIMEOUT_SECS
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/opentask/{name_or_path}.toml"))
        }
    }

    /// Load config from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: ServerConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check that required settings are present.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.storage.database_url.is_empty() {
            anyhow::bail!("storage.database_url must not be empty");
        }
        if self.api.secret.is_empty() {
            anyhow::bail!("api.secret must not be empty");
        }
        Ok(())
    }

    /// Connection options derived from the storage section.
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            url: self.storage.database_url.clone(),
            min_pool_size: self.storage.min_pool_size,
            max_pool_size: self.storage.max_pool_size,
            acquire_timeout: Duration::from_secs(self.storage.acquire_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_full_config() {
        let file = write_config(
            r#"
            listen = "127.0.0.1:4000"

            [storage]
            database_url = "sqlite:///tmp/tasks.db"
            min_pool_size = 4
            max_pool_size = 16
            acquire_timeout_secs = 30

            [api]
            secret = "test-key"
            "#,
        );

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.listen, "127.0.0.1:4000");
        assert_eq!(config.storage.database_url, "sqlite:///tmp/tasks.db");
        assert_eq!(config.storage.min_pool_size, 4);
        assert_eq!(config.storage.max_pool_size, 16);
        assert_eq!(config.storage.acquire_timeout_secs, 30);
        assert_eq!(config.api.secret, "test-key");
        config.validate().unwrap();
    }

    #[test]
    fn minimal_config_applies_defaults() {
        let file = write_config(
            r#"
            [storage]
            database_url = "sqlite::memory:"

            [api]
            secret = "k"
            "#,
        );

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.listen, "0.0.0.0:3001");
        assert_eq!(config.storage.min_pool_size, DEFAULT_MIN_POOL_SIZE);
        assert_eq!(config.storage.max_pool_size, DEFAULT_MAX_POOL_SIZE);
        assert_eq!(
            config.storage.acquire_timeout_secs,
            DEFAULT_ACQUIRE_TIMEOUT_SECS
        );
    }

    #[test]
    fn validate_rejects_empty_values() {
        let file = write_config(
            r#"
            [storage]
            database_url = ""

            [api]
            secret = "k"
            "#,
        );
        let config = ServerConfig::load(file.path()).unwrap();
        assert!(config.validate().is_err());

        let file = write_config(
            r#"
            [storage]
            database_url = "sqlite::memory:"

            [api]
            secret = ""
            "#,
        );
        let config = ServerConfig::load(file.path()).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolve_path_handles_names_and_paths() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/opentask/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("/etc/other/conf.toml"),
            PathBuf::from("/etc/other/conf.toml")
        );
    }

    #[test]
    fn load_missing_file_errors() {
        let err = ServerConfig::load(Path::new("/nonexistent/opentask.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn connect_options_mirror_storage_section() {
        let file = write_config(
            r#"
            [storage]
            database_url = "sqlite:///tmp/t.db"
            acquire_timeout_secs = 7

            [api]
            secret = "k"
            "#,
        );
        let config = ServerConfig::load(file.path()).unwrap();
        let options = config.connect_options();
        assert_eq!(options.url, "sqlite:///tmp/t.db");
        assert_eq!(options.acquire_timeout, Duration::from_secs(7));
    }
}
