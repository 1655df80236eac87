//! Process configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `HOST`: listen address (default: `0.0.0.0`)
//! - `PORT`: listen port (default: `3100`)
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default: `8`)

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3100;
const DEFAULT_POOL_SIZE: u32 = 8;

/// Backing store for task records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage, lost on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` storage.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `STORAGE_MODE` holds an unknown value.
    #[error("invalid STORAGE_MODE '{0}', expected in_memory or postgres")]
    InvalidStorageMode(String),

    /// `DATABASE_URL` is missing while `PostgreSQL` storage is selected.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A numeric variable does not parse or is out of range.
    #[error("invalid {name} '{value}'")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// `HOST` and `PORT` do not form a socket address.
    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),

    /// A variable holds non-UTF-8 data.
    #[error("{0} is not valid UTF-8")]
    NotUnicode(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub listen_address: SocketAddr,
    /// Selected backing store.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub database_pool_size: u32,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable is malformed or
    /// `DATABASE_URL` is missing for `PostgreSQL` storage.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Reads the configuration through `lookup`, which mirrors
    /// [`std::env::var`].
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&'static str) -> Result<String, env::VarError>,
    {
        let read = |name: &'static str| match lookup(name) {
            Ok(value) => Ok(Some(value.trim().to_owned()).filter(|value| !value.is_empty())),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigurationError::NotUnicode(name)),
        };

        let host = read("HOST")?.unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_number("PORT", read("PORT")?, DEFAULT_PORT)?;
        let storage_mode = read("STORAGE_MODE")?
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();
        let database_url = read("DATABASE_URL")?;
        let database_pool_size =
            parse_number("DATABASE_POOL_SIZE", read("DATABASE_POOL_SIZE")?, DEFAULT_POOL_SIZE)?;
        if database_pool_size == 0 {
            return Err(ConfigurationError::InvalidNumber {
                name: "DATABASE_POOL_SIZE",
                value: "0".to_owned(),
            });
        }

        let raw_address = format!("{host}:{port}");
        let listen_address = raw_address
            .parse()
            .map_err(|_| ConfigurationError::InvalidAddress(raw_address))?;

        let config = Self {
            listen_address,
            storage_mode,
            database_url,
            database_pool_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingDatabaseUrl`] when `PostgreSQL`
    /// storage is selected without a URL.
    pub const fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigurationError> {
    raw.map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|_| ConfigurationError::InvalidNumber { name, value })
    })
}
