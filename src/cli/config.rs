//! Configuration file
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "database_path": "./personas.db",
//!   "host": "0.0.0.0",
//!   "port": 8080,
//!   "cors_origins": [],
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::db::IN_MEMORY_PATH;
use crate::http_server::config::{default_host, default_port};
use crate::http_server::HttpServerConfig;
use crate::observability::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file, or `:memory:` for a throwaway store
    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// One of trace, info, warn, error, fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database_path() -> String {
    "./personas.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {:?}: {}", path, e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        self.log_severity()?;
        Ok(())
    }

    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY_PATH
    }

    pub fn database_path(&self) -> &Path {
        Path::new(&self.database_path)
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}
