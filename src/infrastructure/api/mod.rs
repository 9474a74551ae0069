//! Backend API adapters
//!
//! One [`ApiClient`] implements the game-data, character and auth ports.

mod auth;
mod characters;
mod client;
mod game_data;

pub use client::ApiClient;
