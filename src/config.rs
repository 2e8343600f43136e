// src/config.rs
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "outreach.sqlite3";
pub const DEFAULT_SCHEMA_PATH: &str = "sql/schema.sql";
pub const DEFAULT_MAX_WORKERS: usize = 8;
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// What happened when looking for a `.env` file.
#[derive(Debug)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    Missing,
    Unreadable(String),
}

impl DotenvStatus {
    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => DotenvStatus::Loaded(path),
            Err(e) if e.not_found() => DotenvStatus::Missing,
            Err(e) => DotenvStatus::Unreadable(e.to_string()),
        }
    }

    /// Report the outcome once a subscriber is installed.
    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            DotenvStatus::Missing => {}
            DotenvStatus::Unreadable(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
        }
    }
}

/// Export `.env` into the process environment. Runs before tracing starts so
/// `RUST_LOG` can come from the file; existing variables win.
pub fn load_dotenv() -> DotenvStatus {
    DotenvStatus::from_result(dotenvy::dotenv())
}

pub fn load_dotenv_from(path: &Path) -> DotenvStatus {
    DotenvStatus::from_result(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub schema_path: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Automation endpoint notified on campaign creation. `None` disables it.
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            schema_path: DEFAULT_SCHEMA_PATH.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: DEFAULT_MAX_WORKERS,
            webhook_url: None,
            webhook_timeout: Duration::from_secs(DEFAULT_WEBHOOK_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Read `OUTREACH_*` variables from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get("OUTREACH_BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|e| invalid("OUTREACH_BIND_ADDR", &raw, e))?,
            None => defaults.bind_addr,
        };

        let max_workers = match get("OUTREACH_MAX_WORKERS") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("OUTREACH_MAX_WORKERS", &raw, "expected a positive integer"))?,
            None => defaults.max_workers,
        };

        let webhook_timeout = match get("OUTREACH_WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|e| invalid("OUTREACH_WEBHOOK_TIMEOUT_SECS", &raw, e))?,
            ),
            None => defaults.webhook_timeout,
        };

        Ok(Self {
            db_path: get("OUTREACH_DB_PATH").unwrap_or(defaults.db_path),
            schema_path: get("OUTREACH_SCHEMA_PATH").unwrap_or(defaults.schema_path),
            bind_addr,
            max_workers,
            webhook_url: get("OUTREACH_WEBHOOK_URL"),
            webhook_timeout,
        })
    }
}
