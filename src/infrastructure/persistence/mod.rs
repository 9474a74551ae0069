//! Local persistence adapters
//!
//! Drafts and session tokens are kept in a small key-value table, either in
//! SQLite or in process memory.

mod memory_local_store;
mod sqlite_local_store;

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

pub use memory_local_store::InMemoryLocalStore;
pub use sqlite_local_store::SqliteLocalStore;

use crate::application::ports::outbound::LocalStorePort;
use crate::infrastructure::config::{AppConfig, StorageBackend};

/// Build the configured local store
pub async fn create_local_store(config: &AppConfig) -> Result<Arc<dyn LocalStorePort>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory local storage");
            Ok(Arc::new(InMemoryLocalStore::new()))
        }
        StorageBackend::Sqlite => {
            let pool = SqlitePool::connect(&config.database_url)
                .await
                .context("Failed to connect to SQLite local database")?;
            tracing::info!("Connected to SQLite local database: {}", config.database_url);
            let store = SqliteLocalStore::new(pool)
                .await
                .context("Failed to prepare local storage table")?;
            Ok(Arc::new(store))
        }
    }
}
