//! Character entity - saved characters owned by the authenticated user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AbilityScores, CharacterId, ShareToken};

/// A character record as stored by the backend.
///
/// The roster endpoint returns a reduced field set, so sheet fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub ruleset_slug: String,
    #[serde(default)]
    pub race_slug: String,
    #[serde(default)]
    pub subrace_slug: Option<String>,
    #[serde(default)]
    pub class_slug: String,
    #[serde(default)]
    pub background_slug: String,
    #[serde(default)]
    pub alignment: String,
    #[serde(default)]
    pub ability_scores: Option<AbilityScores>,
    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub personality_trait: String,
    #[serde(default)]
    pub ideal: String,
    #[serde(default)]
    pub bond: String,
    #[serde(default)]
    pub flaw: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub share_token: Option<ShareToken>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Character {
    pub fn apply_share_state(&mut self, state: &ShareState) {
        self.is_public = state.is_public;
        self.share_token = Some(state.share_token);
    }
}

/// Result of toggling a character's public sharing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareState {
    pub is_public: bool,
    pub share_token: ShareToken,
}

/// Finalized draft fields sent to the character create endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSubmission {
    pub name: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub appearance: String,
    pub ruleset_slug: String,
    pub race_slug: String,
    pub subrace_slug: String,
    pub class_slug: String,
    pub background_slug: String,
    pub alignment: String,
    pub level: u32,
    pub ability_method: String,
    pub ability_scores: AbilityScores,
    pub skill_proficiencies: Vec<String>,
    pub personality_trait: String,
    pub ideal: String,
    pub bond: String,
    pub flaw: String,
}
