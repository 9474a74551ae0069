//! Wizard draft - the in-progress, not yet submitted character

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    AbilityScores, AbilitySlots, ScoreMethod, CUSTOM_SLUG, CUSTOM_SLUG_PREFIX, DEFAULT_RULESET,
    MIN_CLASS_LEVEL, STANDARD_ARRAY,
};

/// Current draft schema version.
///
/// Version 1 drafts carried a single `class_slug`; version 2 introduced the
/// multiclass `class_entries` list.
pub const DRAFT_VERSION: u32 = 2;

/// Selected race, subrace and the optional player-named race
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceChoice {
    pub slug: String,
    pub custom_name: String,
    pub subrace_slug: String,
}

impl RaceChoice {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn with_subrace(mut self, subrace_slug: impl Into<String>) -> Self {
        self.subrace_slug = subrace_slug.into();
        self
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            slug: CUSTOM_SLUG.to_string(),
            custom_name: name.into(),
            subrace_slug: String::new(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.slug == CUSTOM_SLUG
    }

    pub fn is_empty(&self) -> bool {
        self.slug.is_empty()
    }

    /// Slug sent to the backend; custom races travel as `custom__<name>`
    pub fn submission_slug(&self) -> String {
        if self.is_custom() {
            format!("{}{}", CUSTOM_SLUG_PREFIX, self.custom_name.trim())
        } else {
            self.slug.clone()
        }
    }
}

/// One class in a (multi)class build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub class_slug: String,
    pub level: u8,
}

impl ClassEntry {
    pub fn new(class_slug: impl Into<String>, level: u8) -> Self {
        Self {
            class_slug: class_slug.into(),
            level,
        }
    }
}

impl Default for ClassEntry {
    fn default() -> Self {
        Self::new("", MIN_CLASS_LEVEL)
    }
}

/// The mutable in-progress character record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDraft {
    #[serde(rename = "_version")]
    pub version: u32,
    pub ruleset_slug: String,
    pub race: RaceChoice,
    pub class_entries: Vec<ClassEntry>,
    /// Display name used when the primary class is `custom`
    pub class_custom_name: String,
    pub chosen_skills: BTreeSet<String>,
    pub score_method: ScoreMethod,
    pub score_rolls: Vec<i32>,
    /// Slot held by each ability under standard/roll
    #[serde(default)]
    pub ability_slots: AbilitySlots,
    pub ability_scores: AbilityScores,
    pub name: String,
    pub gender: String,
    pub age: String,
    pub alignment: String,
    pub background_slug: String,
    pub personality_traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,
    pub appearance: String,
}

impl Default for WizardDraft {
    fn default() -> Self {
        Self {
            version: DRAFT_VERSION,
            ruleset_slug: DEFAULT_RULESET.to_string(),
            race: RaceChoice::default(),
            class_entries: vec![ClassEntry::default()],
            class_custom_name: String::new(),
            chosen_skills: BTreeSet::new(),
            score_method: ScoreMethod::Standard,
            score_rolls: Vec::new(),
            ability_slots: AbilitySlots::in_order(),
            // Standard array pre-assigned in sheet order
            ability_scores: AbilityScores::from_array(STANDARD_ARRAY),
            name: String::new(),
            gender: String::new(),
            age: String::new(),
            alignment: String::new(),
            background_slug: String::new(),
            personality_traits: String::new(),
            ideals: String::new(),
            bonds: String::new(),
            flaws: String::new(),
            appearance: String::new(),
        }
    }
}

impl WizardDraft {
    /// Sum of levels across all class entries
    pub fn total_level(&self) -> u32 {
        self.class_entries.iter().map(|c| u32::from(c.level)).sum()
    }

    pub fn primary_class(&self) -> Option<&ClassEntry> {
        self.class_entries.first()
    }

    pub fn primary_class_is_custom(&self) -> bool {
        self.primary_class()
            .is_some_and(|c| c.class_slug == CUSTOM_SLUG)
    }

    /// Slug of the primary class as sent to the backend
    pub fn primary_class_submission_slug(&self) -> String {
        match self.primary_class() {
            Some(entry) if entry.class_slug == CUSTOM_SLUG => {
                format!("{}{}", CUSTOM_SLUG_PREFIX, self.class_custom_name.trim())
            }
            Some(entry) => entry.class_slug.clone(),
            None => String::new(),
        }
    }
}

/// Top-level field replacement for [`WizardDraft`].
///
/// Every `Some` field replaces the draft's field wholesale; nested records are
/// never merged.
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub ruleset_slug: Option<String>,
    pub race: Option<RaceChoice>,
    pub class_entries: Option<Vec<ClassEntry>>,
    pub class_custom_name: Option<String>,
    pub chosen_skills: Option<BTreeSet<String>>,
    pub score_method: Option<ScoreMethod>,
    pub score_rolls: Option<Vec<i32>>,
    pub ability_slots: Option<AbilitySlots>,
    pub ability_scores: Option<AbilityScores>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub alignment: Option<String>,
    pub background_slug: Option<String>,
    pub personality_traits: Option<String>,
    pub ideals: Option<String>,
    pub bonds: Option<String>,
    pub flaws: Option<String>,
    pub appearance: Option<String>,
}

impl DraftPatch {
    pub fn is_empty(&self) -> bool {
        self.ruleset_slug.is_none()
            && self.race.is_none()
            && self.class_entries.is_none()
            && self.class_custom_name.is_none()
            && self.chosen_skills.is_none()
            && self.score_method.is_none()
            && self.score_rolls.is_none()
            && self.ability_slots.is_none()
            && self.ability_scores.is_none()
            && self.name.is_none()
            && self.gender.is_none()
            && self.age.is_none()
            && self.alignment.is_none()
            && self.background_slug.is_none()
            && self.personality_traits.is_none()
            && self.ideals.is_none()
            && self.bonds.is_none()
            && self.flaws.is_none()
            && self.appearance.is_none()
    }

    /// Produce a new draft with the patched fields replaced
    pub fn apply_to(self, draft: &WizardDraft) -> WizardDraft {
        let base = draft.clone();
        WizardDraft {
            version: base.version,
            ruleset_slug: self.ruleset_slug.unwrap_or(base.ruleset_slug),
            race: self.race.unwrap_or(base.race),
            class_entries: self.class_entries.unwrap_or(base.class_entries),
            class_custom_name: self.class_custom_name.unwrap_or(base.class_custom_name),
            chosen_skills: self.chosen_skills.unwrap_or(base.chosen_skills),
            score_method: self.score_method.unwrap_or(base.score_method),
            score_rolls: self.score_rolls.unwrap_or(base.score_rolls),
            ability_slots: self.ability_slots.unwrap_or(base.ability_slots),
            ability_scores: self.ability_scores.unwrap_or(base.ability_scores),
            name: self.name.unwrap_or(base.name),
            gender: self.gender.unwrap_or(base.gender),
            age: self.age.unwrap_or(base.age),
            alignment: self.alignment.unwrap_or(base.alignment),
            background_slug: self.background_slug.unwrap_or(base.background_slug),
            personality_traits: self.personality_traits.unwrap_or(base.personality_traits),
            ideals: self.ideals.unwrap_or(base.ideals),
            bonds: self.bonds.unwrap_or(base.bonds),
            flaws: self.flaws.unwrap_or(base.flaws),
            appearance: self.appearance.unwrap_or(base.appearance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft() {
        let draft = WizardDraft::default();
        assert_eq!(draft.version, DRAFT_VERSION);
        assert_eq!(draft.ruleset_slug, DEFAULT_RULESET);
        assert_eq!(draft.class_entries.len(), 1);
        assert_eq!(draft.total_level(), 1);
        assert_eq!(draft.ability_scores.str, 15);
        assert_eq!(draft.ability_scores.cha, 8);
    }

    #[test]
    fn test_patch_replaces_only_named_fields() {
        let draft = WizardDraft::default();
        let patched = DraftPatch {
            name: Some("Garrick".to_string()),
            class_entries: Some(vec![ClassEntry::new("wizard", 3)]),
            ..Default::default()
        }
        .apply_to(&draft);

        assert_eq!(patched.name, "Garrick");
        assert_eq!(patched.class_entries, vec![ClassEntry::new("wizard", 3)]);
        assert_eq!(patched.ruleset_slug, draft.ruleset_slug);
        assert_eq!(patched.ability_scores, draft.ability_scores);
    }

    #[test]
    fn test_custom_slugs() {
        let race = RaceChoice::custom("  Shadowkin ");
        assert!(race.is_custom());
        assert_eq!(race.submission_slug(), "custom__Shadowkin");

        let mut draft = WizardDraft::default();
        draft.class_entries = vec![ClassEntry::new(CUSTOM_SLUG, 1)];
        draft.class_custom_name = "Bladesinger".to_string();
        assert!(draft.primary_class_is_custom());
        assert_eq!(draft.primary_class_submission_slug(), "custom__Bladesinger");
    }

    #[test]
    fn test_version_field_is_underscored_on_the_wire() {
        let json = serde_json::to_value(WizardDraft::default()).unwrap();
        assert_eq!(json["_version"], DRAFT_VERSION);
        assert_eq!(json["score_method"], "standard");
    }
}
