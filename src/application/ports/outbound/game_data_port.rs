use async_trait::async_trait;

use super::ApiError;
use crate::domain::entities::{Background, CharClass, Race};

/// Read-only rules catalog served by the backend
#[async_trait]
pub trait GameDataPort: Send + Sync {
    /// All races with their subraces
    async fn list_races(&self) -> Result<Vec<Race>, ApiError>;

    /// All classes with per-level features
    async fn list_classes(&self) -> Result<Vec<CharClass>, ApiError>;

    /// All backgrounds with granted skills
    async fn list_backgrounds(&self) -> Result<Vec<Background>, ApiError>;
}
