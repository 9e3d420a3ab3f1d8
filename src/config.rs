//! Application configuration from TOML files and environment variables.
//!
//! A config file is optional; every setting has a default and the usual
//! environment variables (`HOST`, `PORT`, `REPOSITORY_TYPE`) override the
//! file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::db::factory::RepositoryType;
use crate::services::EngineSettings;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub engine: EngineTtlSettings,
}

/// HTTP bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Repository backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

/// Lock and idempotency TTLs, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineTtlSettings {
    #[serde(default = "default_lock_ttl")]
    pub lock_ttl_seconds: u64,
    #[serde(default = "default_idempotency_ttl")]
    pub idempotency_ttl_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_lock_ttl() -> u64 {
    10
}

fn default_idempotency_ttl() -> u64 {
    60
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

impl Default for EngineTtlSettings {
    fn default() -> Self {
        Self {
            lock_ttl_seconds: default_lock_ttl(),
            idempotency_ttl_seconds: default_idempotency_ttl(),
        }
    }
}

impl AppConfig {
    /// Read configuration from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Build configuration from `CONFIG_PATH` (if set) and apply environment
    /// overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            config.repository.repo_type = repo_type;
        }

        Ok(config)
    }

    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::parse(&self.repository.repo_type)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            lock_ttl: Duration::from_secs(self.engine.lock_ttl_seconds),
            idempotency_ttl: Duration::from_secs(self.engine.idempotency_ttl_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(config.engine.lock_ttl_seconds, 10);
        assert_eq!(config.engine.idempotency_ttl_seconds, 60);
    }

    #[test]
    fn test_parse_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090

            [repository]
            type = "local"

            [engine]
            lock_ttl_seconds = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.engine.lock_ttl_seconds, 5);
        // unset key falls back to its default
        assert_eq!(config.engine.idempotency_ttl_seconds, 60);
    }

    #[test]
    fn test_engine_settings_conversion() {
        let config = AppConfig::default();
        let settings = config.engine_settings();
        assert_eq!(settings.lock_ttl, Duration::from_secs(10));
        assert_eq!(settings.idempotency_ttl, Duration::from_secs(60));
    }
}
