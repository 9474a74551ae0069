use async_trait::async_trait;

use super::ApiError;
use crate::domain::entities::{Character, CharacterSubmission, ShareState};
use crate::domain::value_objects::CharacterId;

/// Character persistence owned by the authenticated user
#[async_trait]
pub trait CharacterPort: Send + Sync {
    async fn list(&self) -> Result<Vec<Character>, ApiError>;

    /// Store a new character; the returned record carries the server id
    async fn create(&self, submission: &CharacterSubmission) -> Result<Character, ApiError>;

    async fn delete(&self, id: CharacterId) -> Result<(), ApiError>;

    /// Flip public sharing and return the new state
    async fn toggle_share(&self, id: CharacterId) -> Result<ShareState, ApiError>;
}
