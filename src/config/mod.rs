//! Configuration loading and management
//!
//! Configuration comes from a YAML file (every key optional) and is then
//! overridden by environment variables:
//!
//! | Variable | Effect |
//! |---|---|
//! | `ROSTER_CONFIG` | path of the YAML file (default `roster.yaml`, skipped if absent) |
//! | `ROSTER_BIND` | `server.bind` |
//! | `ROSTER_DATABASE_URL` | `database.url` |
//!
//! ```yaml
//! server:
//!   bind: 0.0.0.0:5000
//! database:
//!   url: sqlite://fanta-roster.db
//!   max_connections: 5
//! seed:
//!   csv_path: db.csv
//! session:
//!   cookie_name: roster_session
//! ```

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "roster.yaml";

pub const ENV_CONFIG: &str = "ROSTER_CONFIG";
pub const ENV_BIND: &str = "ROSTER_BIND";
pub const ENV_DATABASE_URL: &str = "ROSTER_DATABASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://fanta-roster.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Initial data loaded into an empty database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub csv_path: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            csv_path: Some(PathBuf::from("db.csv")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "roster_session".to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Apply overrides from a variable lookup
    ///
    /// Takes the lookup as a closure so tests don't have to touch the
    /// process environment.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database.url = url;
        }
        self
    }

    /// Resolve the configuration the way the binary does
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load() -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        let config = match env(ENV_CONFIG) {
            Some(path) => Self::from_yaml_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_yaml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        Ok(config.with_overrides(env))
    }
}
