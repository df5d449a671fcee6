//! Configuration loading and representation.
//!
//! Sources, lowest precedence first: built-in defaults, an optional file
//! (`CONFIG_FILE`, else `config/{ENVIRONMENT}`), then `DIGIBANK__*`
//! environment variables (`DIGIBANK__SERVER__PORT=9090`).

use std::env;

use config::{ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};

use digibank_observability::LogSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let file = env::var("CONFIG_FILE").unwrap_or_else(|_| format!("config/{environment}"));
        Self::build(Some(&file), None)
    }

    /// `env_override` replaces the process environment as the variable
    /// source when given.
    fn build(file: Option<&str>, env_override: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("log.level", "info")?
            .set_default("log.format", "json")?;

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("DIGIBANK")
                .separator("__")
                .try_parsing(true)
                .source(env_override),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server port cannot be 0".to_string());
        }
        if self.server.host.trim().is_empty() {
            return Err("server host is required".to_string());
        }
        if self.log.level.trim().is_empty() {
            return Err("log level is required".to_string());
        }
        Ok(())
    }
}
