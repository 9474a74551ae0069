//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - API: reqwest client for the character backend
//! - CLI: wizard steps for the `draft` command
//! - Persistence: SQLite and in-memory local storage
//! - Config: Application configuration
//! - State: Shared application state

pub mod api;
pub mod cli;
pub mod config;
pub mod persistence;
pub mod state;
