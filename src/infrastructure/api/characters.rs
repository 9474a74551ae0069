//! Character persistence endpoints

use async_trait::async_trait;
use tracing::instrument;

use super::ApiClient;
use crate::application::ports::outbound::{ApiError, CharacterPort};
use crate::domain::entities::{Character, CharacterSubmission, ShareState};
use crate::domain::value_objects::CharacterId;

#[async_trait]
impl CharacterPort for ApiClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Character>, ApiError> {
        self.get_all("/characters/").await
    }

    #[instrument(skip(self, submission), fields(name = %submission.name))]
    async fn create(&self, submission: &CharacterSubmission) -> Result<Character, ApiError> {
        self.post("/characters/", submission).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CharacterId) -> Result<(), ApiError> {
        self.delete_resource(&format!("/characters/{id}/")).await
    }

    #[instrument(skip(self))]
    async fn toggle_share(&self, id: CharacterId) -> Result<ShareState, ApiError> {
        self.post_empty(&format!("/characters/{id}/share/")).await
    }
}
