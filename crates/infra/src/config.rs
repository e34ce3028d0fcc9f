//! Store selection from the environment.
//!
//! - `ROLODEX_STORE`: `memory` (default) or `sqlite`
//! - `DATABASE_URL`: sqlx SQLite URL, used when the backend is `sqlite`

use thiserror::Error;
use tracing::warn;

pub const STORE_ENV: &str = "ROLODEX_STORE";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://rolodex.db?mode=rwc";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown store backend {0:?} (expected \"memory\" or \"sqlite\")")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Sqlite { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::InMemory,
        }
    }

    pub fn sqlite(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Sqlite { url: url.into() },
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in
    /// [`StoreConfig::from_env`]).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup(STORE_ENV)
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "memory".to_string());

        match backend.as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(Self::in_memory()),
            "sqlite" => {
                let url = lookup(DATABASE_URL_ENV)
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| {
                        warn!("{DATABASE_URL_ENV} not set, using {DEFAULT_DATABASE_URL}");
                        DEFAULT_DATABASE_URL.to_string()
                    });
                Ok(Self::sqlite(url))
            }
            _ => Err(ConfigError::UnknownBackend(backend)),
        }
    }
}
