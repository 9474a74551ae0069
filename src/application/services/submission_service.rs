//! Submission Service - Turn the finished draft into a saved character

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::ports::outbound::{ApiError, CharacterPort};
use crate::application::services::catalog_service::CatalogService;
use crate::application::services::roster_service::RosterService;
use crate::application::services::wizard_service::WizardService;
use crate::domain::entities::Character;
use crate::domain::services::{build_submission, submission_blockers, SubmissionBlocker};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Character is not ready: {}", describe(.0))]
    Blocked(Vec<SubmissionBlocker>),
    /// Server-side validation, every field message joined
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to create character: {0}")]
    Api(#[source] ApiError),
}

fn describe(blockers: &[SubmissionBlocker]) -> String {
    blockers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ApiError> for SubmissionError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Validation(fields) => Self::Rejected(fields.joined()),
            other => Self::Api(other),
        }
    }
}

pub struct SubmissionService {
    characters: Arc<dyn CharacterPort>,
    wizard: Arc<WizardService>,
    catalog: Arc<CatalogService>,
    roster: Arc<RosterService>,
}

impl SubmissionService {
    pub fn new(
        characters: Arc<dyn CharacterPort>,
        wizard: Arc<WizardService>,
        catalog: Arc<CatalogService>,
        roster: Arc<RosterService>,
    ) -> Self {
        Self {
            characters,
            wizard,
            catalog,
            roster,
        }
    }

    /// Submit the current draft.
    ///
    /// On success the roster is refreshed and the draft reset. On failure the
    /// draft is left exactly as it was.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<Character, SubmissionError> {
        let draft = self.wizard.snapshot().await;
        let catalog = self.catalog.snapshot().await;

        let blockers = submission_blockers(&draft, &catalog.races);
        if !blockers.is_empty() {
            return Err(SubmissionError::Blocked(blockers));
        }

        let submission = build_submission(&draft, catalog.background(&draft.background_slug));
        let character = self.characters.create(&submission).await?;
        info!(
            character_id = %character.id,
            name = %character.name,
            level = submission.level,
            "Created character"
        );

        // The roster view replaces the wizard
        self.roster.navigate();
        if let Err(e) = self.roster.refresh().await {
            warn!(error = %e, "Roster refresh after submission failed");
        }
        self.wizard.reset().await;
        Ok(character)
    }
}
