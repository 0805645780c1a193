//! Application configuration.
//!
//! Settings come from `TRACKER_*` environment variables. Unset variables take their
//! defaults; set but malformed variables are startup errors.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_DATABASE_PATH: &str = "instance/database.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Key used when `TRACKER_SECRET_KEY` is unset. Only fit for local development.
const DEVELOPMENT_SECRET: &str = "parcel-tracker-development-secret";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddress { var: &'static str, value: String },
    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidCapacity { var: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("TRACKER_SECRET_KEY cannot be used as an HMAC key")]
    InvalidSecretKey,
}

/// Settings for one tracker process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file. Its directory is created on first run.
    pub database_path: PathBuf,
    /// HMAC key for flash cookies.
    pub secret_key: String,
    pub bind: SocketAddr,
    /// Refuse to add an order whose content matches an existing one.
    pub reject_duplicates: bool,
    /// Honour the `mark_completed` checkbox on the add form.
    pub allow_complete_on_create: bool,
    /// Request queue size of each table actor.
    pub channel_capacity: usize,
}

impl AppConfig {
    /// Defaults for everything except the database location.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            secret_key: DEVELOPMENT_SECRET.to_string(),
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            reject_duplicates: false,
            allow_complete_on_create: false,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = key.into();
        self
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    pub fn with_reject_duplicates(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }

    pub fn with_allow_complete_on_create(mut self, allow: bool) -> Self {
        self.allow_complete_on_create = allow;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_path = lookup("TRACKER_DATABASE_PATH")
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
        if database_path.trim().is_empty() {
            return Err(ConfigError::Empty("TRACKER_DATABASE_PATH"));
        }

        let secret_key = match lookup("TRACKER_SECRET_KEY") {
            Some(key) if key.is_empty() => return Err(ConfigError::Empty("TRACKER_SECRET_KEY")),
            Some(key) => key,
            None => {
                warn!("TRACKER_SECRET_KEY is unset; using the development key");
                DEVELOPMENT_SECRET.to_string()
            }
        };

        let bind_var = "TRACKER_BIND";
        let bind_value = lookup(bind_var).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse()
            .map_err(|_| ConfigError::InvalidAddress {
                var: bind_var,
                value: bind_value.clone(),
            })?;

        let capacity_var = "TRACKER_CHANNEL_CAPACITY";
        let channel_capacity = match lookup(capacity_var) {
            None => DEFAULT_CHANNEL_CAPACITY,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidCapacity {
                        var: capacity_var,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            database_path: PathBuf::from(database_path),
            secret_key,
            bind,
            reject_duplicates: parse_flag(&lookup, "TRACKER_REJECT_DUPLICATES")?,
            allow_complete_on_create: parse_flag(&lookup, "TRACKER_ALLOW_COMPLETE_ON_CREATE")?,
            channel_capacity,
        })
    }
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(false);
    };
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}
