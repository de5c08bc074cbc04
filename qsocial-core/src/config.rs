//! Startup configuration
//!
//! Resolved once, in order of increasing priority:
//! 1. Built-in defaults (local development)
//! 2. TOML file (`--config`, or `~/.qsocial/config.toml` when present)
//! 3. Environment variables: `QSOCIAL_ENV`, `QSOCIAL_API_URL`, `CORS_ORIGINS`,
//!    `DATABASE_URL`, `PORT`
//!
//! Binaries apply CLI flags on top and then pass the struct down explicitly.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/messages.db";
pub const DEFAULT_PORT: u16 = 3001;

/// Deployment target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Single local process backed by a SQLite file
    #[default]
    Local,
    /// Hosted deployment backed by a managed Postgres database
    Cloud,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Cloud => f.write_str("cloud"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "cloud" | "aws" => Ok(Self::Cloud),
            other => Err(ConfigError::InvalidValue {
                key: "QSOCIAL_ENV",
                value: other.to_string(),
                reason: "expected 'local' or 'cloud'",
            }),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid {key} value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Application configuration shared by the server, gateway and client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    /// Where clients send requests
    pub api_base_url: String,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
    /// Storage location (`sqlite://`, `postgres://` or `memory:`)
    pub database_url: String,
    /// Listen port for the local HTTP server
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// On-disk form; every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub environment: Option<Environment>,
    pub api_base_url: Option<String>,
    pub cors_origins: Option<Vec<String>>,
    pub database_url: Option<String>,
    pub port: Option<u16>,
}

impl AppConfig {
    /// Default config file path: ~/.qsocial/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".qsocial/config.toml")
    }

    /// Resolve defaults, file and process environment.
    ///
    /// An explicit `path` must exist; the default path is only read if present.
    /// Cross-field checks are left to [`validate`](Self::validate), which callers
    /// run once their own overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let file_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Some(Self::config_path()).filter(|p| p.exists()),
        };

        if let Some(file_path) = file_path {
            tracing::debug!(path = %file_path.display(), "loading config file");
            config.apply_file(Self::read_file(&file_path)?);
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(environment) = file.environment {
            self.environment = environment;
        }
        if let Some(url) = file.api_base_url {
            self.api_base_url = url;
        }
        if let Some(origins) = file.cors_origins {
            self.cors_origins = origins;
        }
        if let Some(url) = file.database_url {
            self.database_url = url;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
    }

    /// Apply environment overrides through `lookup` (injectable for tests).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("QSOCIAL_ENV") {
            self.environment = env.parse()?;
        }
        if let Some(url) = lookup("QSOCIAL_API_URL") {
            self.api_base_url = url;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors_origins = parse_origins(&origins);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
                reason: "expected a port number",
            })?;
        }
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment == Environment::Cloud {
            if !is_postgres_url(&self.database_url) {
                return Err(ConfigError::Invalid(format!(
                    "cloud environment requires a postgres DATABASE_URL, got '{}'",
                    self.database_url
                )));
            }
            if self.cors_origins.is_empty() {
                return Err(ConfigError::Invalid(
                    "cloud environment requires at least one CORS origin".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_local() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Local);
        assert_eq!(config.port, 3001);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.database_url, "sqlite://data/messages.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_defaults() {
        let mut config = AppConfig::default();
        config
            .apply_env(lookup_from(&[
                ("PORT", "8080"),
                ("CORS_ORIGINS", "https://a.example, https://b.example/ ,"),
                ("QSOCIAL_API_URL", "https://api.example"),
            ]))
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.api_base_url, "https://api.example");
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut config = AppConfig::default();
        let err = config.apply_env(lookup_from(&[("PORT", "lots")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn cloud_needs_postgres() {
        let mut config = AppConfig::default();
        config
            .apply_env(lookup_from(&[("QSOCIAL_ENV", "cloud")]))
            .unwrap();
        assert!(config.validate().is_err());

        config.database_url = "postgres://db.internal/qsocial".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port = 4000\ndatabase_url = \"sqlite:///tmp/q.db\"\ncors_origins = [\"https://x.example\"]"
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.apply_file(AppConfig::read_file(file.path()).unwrap());
        config.apply_env(lookup_from(&[("PORT", "5000")])).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.database_url, "sqlite:///tmp/q.db");
        assert_eq!(config.cors_origins, vec!["https://x.example"]);
    }

    #[test]
    fn load_leaves_cloud_rule_to_the_caller() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "environment = \"cloud\"").unwrap();

        // Flags applied after loading may still supply the postgres URL
        let mut config = AppConfig::load(Some(file.path())).unwrap();
        config.environment = Environment::Cloud;
        config.database_url = "postgres://db.internal/qsocial".to_string();
        config.cors_origins = vec!["https://a.example".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_file_keys_fail() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prot = 4000").unwrap();
        assert!(matches!(
            AppConfig::read_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
