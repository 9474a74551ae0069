//! Roster Service - The signed-in user's saved characters
//!
//! A refresh that completes after the view it was started for has been left
//! is discarded. Views are tracked with a navigation epoch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{ApiError, CharacterPort};
use crate::domain::entities::{Character, ShareState};
use crate::domain::value_objects::CharacterId;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub characters: Vec<Character>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Whether a finished refresh was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Stale,
}

pub struct RosterService {
    characters: Arc<dyn CharacterPort>,
    roster: RwLock<Roster>,
    epoch: AtomicU64,
}

impl RosterService {
    pub fn new(characters: Arc<dyn CharacterPort>) -> Self {
        Self {
            characters,
            roster: RwLock::new(Roster::default()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Mark a navigation; refreshes started earlier become stale
    pub fn navigate(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<RefreshOutcome, ApiError> {
        let started_at = self.epoch.load(Ordering::SeqCst);
        {
            let mut roster = self.roster.write().await;
            roster.loading = true;
            roster.error = None;
        }

        let result = self.characters.list().await;

        if self.epoch.load(Ordering::SeqCst) != started_at {
            debug!(started_at, "Discarding stale roster response");
            self.roster.write().await.loading = false;
            return Ok(RefreshOutcome::Stale);
        }

        let mut roster = self.roster.write().await;
        roster.loading = false;
        match result {
            Ok(characters) => {
                info!(count = characters.len(), "Loaded character roster");
                roster.characters = characters;
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load character roster");
                roster.error = Some(format!("Failed to load characters: {e}"));
                Err(e)
            }
        }
    }

    /// Delete on the backend, then drop the local copy
    #[instrument(skip(self), fields(character_id = %id))]
    pub async fn delete(&self, id: CharacterId) -> Result<(), ApiError> {
        self.characters.delete(id).await?;
        self.roster.write().await.characters.retain(|c| c.id != id);
        info!("Deleted character");
        Ok(())
    }

    /// Flip public sharing and mirror the new state locally
    #[instrument(skip(self), fields(character_id = %id))]
    pub async fn toggle_share(&self, id: CharacterId) -> Result<ShareState, ApiError> {
        let state = self.characters.toggle_share(id).await?;
        let mut roster = self.roster.write().await;
        if let Some(character) = roster.characters.iter_mut().find(|c| c.id == id) {
            character.apply_share_state(&state);
        }
        info!(is_public = state.is_public, "Toggled sharing");
        Ok(state)
    }

    pub async fn snapshot(&self) -> Roster {
        self.roster.read().await.clone()
    }
}
