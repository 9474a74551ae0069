//! Game-data catalog endpoints

use async_trait::async_trait;
use tracing::instrument;

use super::ApiClient;
use crate::application::ports::outbound::{ApiError, GameDataPort};
use crate::domain::entities::{Background, CharClass, Race};

#[async_trait]
impl GameDataPort for ApiClient {
    #[instrument(skip(self))]
    async fn list_races(&self) -> Result<Vec<Race>, ApiError> {
        self.get_all("/gamedata/races/").await
    }

    #[instrument(skip(self))]
    async fn list_classes(&self) -> Result<Vec<CharClass>, ApiError> {
        self.get_all("/gamedata/classes/").await
    }

    #[instrument(skip(self))]
    async fn list_backgrounds(&self) -> Result<Vec<Background>, ApiError> {
        self.get_all("/gamedata/backgrounds/").await
    }
}
