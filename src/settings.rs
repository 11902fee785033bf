//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - `catalog.toml` in the working directory (or the file passed explicitly)
//! - environment variables prefixed with `CATALOG__`, e.g. `CATALOG__SERVER__PORT=9000`

use std::net::SocketAddr;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Path to the SQLite file, created when missing
    pub path: String,
    pub max_connections: u32,
}

impl Settings {
    /// Loads settings from `catalog.toml` (optional) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder(File::with_name("catalog").required(false))
    }

    /// Loads settings from an explicit file, which must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::builder(File::from(path).required(true))
    }

    fn builder<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.path", "trivia.db")?
            .set_default("database.max_connections", 5)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("CATALOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
