// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration Types
//
// Defines the YAML configuration schema for the franchise inventory daemon:
// - HTTP bind address
// - Storage backend selection (in-memory or PostgreSQL)
// - Logging level and output format
//
// Every field has a default, so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::gateway::{PostgresConfig, StorageBackend};

pub const CONFIG_PATH_ENV: &str = "FRANCHISE_CONFIG_PATH";
pub const DATABASE_URL_ENV: &str = "FRANCHISE_DATABASE_URL";
const DEFAULT_CONFIG_FILE: &str = "./franchise-config.yaml";

/// Top-level service configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind the HTTP API on
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageKind,

    /// Required when `backend` is `postgres`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageKind::InMemory,
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Compact,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Discover configuration file using precedence order
    /// 1. FRANCHISE_CONFIG_PATH environment variable
    /// 2. ./franchise-config.yaml (working directory)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from(DEFAULT_CONFIG_FILE);
        if cwd.exists() {
            return Some(cwd);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = match Self::discover_config() {
            Some(config_path) => {
                tracing::info!("Loading configuration from discovered path: {:?}", config_path);
                Self::from_yaml_file(config_path)?
            }
            None => {
                tracing::warn!("No configuration file found. Using defaults.");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::info!("Environment override: {} set, using postgres backend", DATABASE_URL_ENV);
                self.storage.backend = StorageKind::Postgres;
                self.storage.database_url = Some(url);
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.host.trim().is_empty() {
            anyhow::bail!("server.host cannot be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("server.port must be greater than 0");
        }

        if self.storage.max_connections == 0 {
            anyhow::bail!("storage.max_connections must be greater than 0");
        }

        if self.storage.backend == StorageKind::Postgres
            && self.storage.database_url.as_deref().map_or(true, |url| url.trim().is_empty())
        {
            anyhow::bail!("storage.database_url is required for the postgres backend");
        }

        Ok(())
    }

    /// Storage backend selection for the repository factory
    pub fn storage_backend(&self) -> StorageBackend {
        match (self.storage.backend, &self.storage.database_url) {
            (StorageKind::Postgres, Some(url)) => StorageBackend::PostgreSQL(PostgresConfig {
                connection_string: url.clone(),
                max_connections: self.storage.max_connections,
            }),
            _ => StorageBackend::InMemory,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageKind::InMemory);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_backend(), StorageBackend::InMemory);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ServiceConfig::from_yaml_str(
            r#"
server:
  port: 9090
storage:
  backend: postgres
  database_url: postgres://localhost/franchises
logging:
  format: json
"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.max_connections, 5);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.storage_backend(),
            StorageBackend::PostgreSQL(PostgresConfig {
                connection_string: "postgres://localhost/franchises".to_string(),
                max_connections: 5,
            })
        );
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ServiceConfig::from_yaml_str("").unwrap(), ServiceConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut config = ServiceConfig::default();

        config.server.port = 0;
        assert!(config.validate().is_err());
        config.server.port = 8080;

        config.storage.backend = StorageKind::Postgres;
        assert!(config.validate().is_err());
        config.storage.database_url = Some("postgres://localhost/db".to_string());
        assert!(config.validate().is_ok());

        config.storage.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  host: 0.0.0.0\n  port: 8181").unwrap();

        let config = ServiceConfig::load_or_default(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8181");
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let result = ServiceConfig::load_or_default(Some(PathBuf::from("/nonexistent/franchise.yaml")));
        assert!(result.is_err());
    }
}
