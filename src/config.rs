use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEVELOPMENT_POOL_SIZE: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Whether the service runs on a developer machine or in a deployed container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl FromStr for RunMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(RunMode::Development),
            "production" | "prod" => Ok(RunMode::Production),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Development => write!(f, "development"),
            RunMode::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        pool_size: Option<u32>,
    },
    Memory,
}

// The connection string carries credentials, keep it out of logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreConfig::Postgres { pool_size, .. } => f
                .debug_struct("Postgres")
                .field("database_url", &"<redacted>")
                .field("pool_size", pool_size)
                .finish(),
            StoreConfig::Memory => write!(f, "Memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub run_mode: RunMode,
    pub store: StoreConfig,
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let run_mode = match lookup("APP_ENV") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "APP_ENV", value })?,
            None => RunMode::Development,
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let store = match lookup("TODO_STORE").as_deref() {
            None | Some("postgres") => {
                let database_url =
                    lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let pool_size = match lookup("DATABASE_POOL_SIZE") {
                    Some(value) => match value.parse::<u32>() {
                        Ok(size) if size > 0 => Some(size),
                        _ => {
                            return Err(ConfigError::Invalid {
                                key: "DATABASE_POOL_SIZE",
                                value,
                            })
                        }
                    },
                    None if run_mode == RunMode::Development => Some(DEVELOPMENT_POOL_SIZE),
                    None => None,
                };
                StoreConfig::Postgres {
                    database_url,
                    pool_size,
                }
            }
            Some("memory") => StoreConfig::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "TODO_STORE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            run_mode,
            store,
        })
    }
}
