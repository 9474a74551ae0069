//! Application configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::domain::value_objects::DEFAULT_RULESET;

/// Where drafts and tokens are kept between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown storage backend: {other} (expected sqlite or memory)"),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Character backend API root, without trailing slash
    pub api_base_url: String,
    /// Per-request timeout for backend calls
    pub http_timeout: Duration,

    /// Local storage backend
    pub storage: StorageBackend,
    /// SQLite connection string used by the sqlite backend
    pub database_url: String,

    /// Ruleset a fresh draft starts on
    pub default_ruleset: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base_url: env::var("CHARFORGE_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string())
                .trim_end_matches('/')
                .to_string(),
            http_timeout: Duration::from_secs(
                env::var("CHARFORGE_HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()
                    .context("CHARFORGE_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),

            storage: env::var("CHARFORGE_STORAGE")
                .unwrap_or_else(|_| "sqlite".to_string())
                .parse()
                .context("CHARFORGE_STORAGE is invalid")?,
            database_url: env::var("CHARFORGE_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:charforge.db?mode=rwc".to_string()),

            default_ruleset: env::var("CHARFORGE_DEFAULT_RULESET")
                .unwrap_or_else(|_| DEFAULT_RULESET.to_string()),
        })
    }
}
