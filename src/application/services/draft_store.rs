//! Draft Store - Single owner of the in-progress wizard draft
//!
//! Every mutation replaces the draft with a new value. Rejected edits leave
//! the draft untouched and report why through [`Adjustment`].
//!
//! Chosen skills never repeat a skill the current background already grants.
//! The store remembers the granted set of the last background selected from
//! the catalog.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::entities::{
    Background, CharClass, ClassEntry, DraftPatch, Race, RaceChoice, WizardDraft,
};
use crate::domain::services::ability_engine::{self, Rejection};
use crate::domain::services::draft_rules::{check_class_entries, DraftViolation};
use crate::domain::value_objects::{
    age_range, Ability, AbilityScores, AbilitySlots, ScoreMethod, ALIGNMENTS, GENDERS,
    MAX_CLASS_ENTRIES, MAX_TOTAL_LEVEL, MIN_CLASS_LEVEL, STANDARD_ARRAY,
};

const RANDOM_NAMES: [&str; 18] = [
    "Aerith", "Calvin", "Moira", "Terrence", "Sylvia", "Garrick", "Phyllis", "Oden",
    "Seraphina", "Corrig", "Ilaf", "Brandon", "Atra", "Willow", "Torgon", "Narasi", "Elwin",
    "Tanis",
];

/// Why an edit was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftRejection {
    #[error(transparent)]
    Scores(#[from] Rejection),
    #[error("Ruleset is locked once confirmed")]
    RulesetLocked,
    #[error("A character can have at most 3 classes")]
    TooManyClasses,
    #[error("Total level cannot exceed 20")]
    LevelCapReached,
    #[error("Class level must be at least 1")]
    InvalidLevel,
    #[error("No class entry at index {0}")]
    NoSuchClass(usize),
    #[error("The primary class cannot be removed")]
    PrimaryClassRequired,
    #[error("Game data has not been loaded")]
    CatalogNotLoaded,
    #[error("A character needs at least one class")]
    NoClasses,
    #[error("Ability scores do not match the score method")]
    InconsistentScores,
}

impl From<DraftViolation> for DraftRejection {
    fn from(violation: DraftViolation) -> Self {
        match violation {
            DraftViolation::NoClasses => Self::NoClasses,
            DraftViolation::TooManyClasses => Self::TooManyClasses,
            DraftViolation::InvalidLevel => Self::InvalidLevel,
            DraftViolation::LevelCapExceeded => Self::LevelCapReached,
            DraftViolation::InconsistentScores => Self::InconsistentScores,
        }
    }
}

/// Outcome of an edit
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Accepted,
    Rejected(DraftRejection),
}

impl Adjustment {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[derive(Debug, Clone)]
pub struct DraftStore {
    draft: WizardDraft,
    ruleset_confirmed: bool,
    default_ruleset: String,
    granted_skills: BTreeSet<String>,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new(WizardDraft::default().ruleset_slug)
    }
}

impl DraftStore {
    /// Fresh store whose drafts start on `default_ruleset`
    pub fn new(default_ruleset: impl Into<String>) -> Self {
        let default_ruleset = default_ruleset.into();
        Self {
            draft: fresh_draft(&default_ruleset),
            ruleset_confirmed: false,
            default_ruleset,
            granted_skills: BTreeSet::new(),
        }
    }

    pub fn draft(&self) -> &WizardDraft {
        &self.draft
    }

    pub fn ruleset_confirmed(&self) -> bool {
        self.ruleset_confirmed
    }

    /// Swap in a draft restored from storage
    pub fn replace(&mut self, draft: WizardDraft) {
        self.draft = draft;
        self.granted_skills.clear();
    }

    pub fn confirm_ruleset(&mut self) {
        self.ruleset_confirmed = true;
    }

    /// Back to defaults; the ruleset is unlocked again
    pub fn reset(&mut self) {
        self.draft = fresh_draft(&self.default_ruleset);
        self.ruleset_confirmed = false;
        self.granted_skills.clear();
    }

    /// Top-level shallow merge of `patch` into the draft.
    ///
    /// The whole patch is rejected if any part breaks a draft rule. A race
    /// goes through [`Self::set_race`] and a different score method through
    /// the method switch. Raw score fields are accepted only when the result
    /// is consistent. A new background slug drops the chosen skills, since
    /// its granted skills are not known here.
    pub fn update(&mut self, mut patch: DraftPatch) -> Adjustment {
        let changes_ruleset = patch
            .ruleset_slug
            .as_ref()
            .is_some_and(|slug| *slug != self.draft.ruleset_slug);
        if self.ruleset_confirmed && changes_ruleset {
            return Adjustment::Rejected(DraftRejection::RulesetLocked);
        }
        if let Some(entries) = &patch.class_entries {
            if let Err(violation) = check_class_entries(entries) {
                return Adjustment::Rejected(violation.into());
            }
        }

        let race = patch.race.take();
        let method = patch.score_method.take();
        let chosen_skills = patch.chosen_skills.take();
        let score_rolls = patch.score_rolls.take();
        let ability_slots = patch.ability_slots.take();
        let ability_scores = patch.ability_scores.take();
        let raw_scores =
            score_rolls.is_some() || ability_slots.is_some() || ability_scores.is_some();
        let changes_background = patch
            .background_slug
            .as_ref()
            .is_some_and(|slug| *slug != self.draft.background_slug);

        let mut next = patch.apply_to(&self.draft);
        if let Some(race) = race {
            next = with_race(&next, race);
        }
        if let Some(method) = method.filter(|m| *m != next.score_method) {
            next = ability_engine::switch_method(&next, method);
        }
        if let Some(rolls) = score_rolls {
            next.score_rolls = rolls;
        }
        if let Some(slots) = ability_slots {
            next.ability_slots = slots;
        }
        if let Some(scores) = ability_scores {
            next.ability_scores = scores;
        }
        if raw_scores && !ability_engine::scores_consistent(&next) {
            return Adjustment::Rejected(DraftRejection::InconsistentScores);
        }

        let mut granted = self.granted_skills.clone();
        if changes_background {
            granted.clear();
            next.chosen_skills.clear();
        }
        if let Some(skills) = chosen_skills {
            next.chosen_skills = skills.difference(&granted).cloned().collect();
        }

        self.granted_skills = granted;
        self.draft = next;
        Adjustment::Accepted
    }

    /// Append an empty level-1 class entry
    pub fn add_class(&mut self) -> Adjustment {
        if self.draft.class_entries.len() >= MAX_CLASS_ENTRIES {
            return Adjustment::Rejected(DraftRejection::TooManyClasses);
        }
        if self.draft.total_level() >= u32::from(MAX_TOTAL_LEVEL) {
            return Adjustment::Rejected(DraftRejection::LevelCapReached);
        }
        let mut entries = self.draft.class_entries.clone();
        entries.push(ClassEntry::default());
        self.replace_entries(entries)
    }

    /// Remove a multiclass entry; the primary entry stays
    pub fn remove_class(&mut self, index: usize) -> Adjustment {
        if index == 0 {
            return Adjustment::Rejected(DraftRejection::PrimaryClassRequired);
        }
        if index >= self.draft.class_entries.len() {
            return Adjustment::Rejected(DraftRejection::NoSuchClass(index));
        }
        let mut entries = self.draft.class_entries.clone();
        entries.remove(index);
        self.replace_entries(entries)
    }

    /// Replace one class entry wholesale
    pub fn update_class(&mut self, index: usize, entry: ClassEntry) -> Adjustment {
        let Some(current) = self.draft.class_entries.get(index) else {
            return Adjustment::Rejected(DraftRejection::NoSuchClass(index));
        };
        if entry.level < MIN_CLASS_LEVEL {
            return Adjustment::Rejected(DraftRejection::InvalidLevel);
        }
        let others = self.draft.total_level() - u32::from(current.level);
        if others + u32::from(entry.level) > u32::from(MAX_TOTAL_LEVEL) {
            return Adjustment::Rejected(DraftRejection::LevelCapReached);
        }

        let mut entries = self.draft.class_entries.clone();
        entries[index] = entry;
        self.replace_entries(entries)
    }

    /// Set one entry's level, clamped so the total stays within the cap
    pub fn set_class_level(&mut self, index: usize, level: u8) -> Adjustment {
        let Some(current) = self.draft.class_entries.get(index) else {
            return Adjustment::Rejected(DraftRejection::NoSuchClass(index));
        };
        let others = self.draft.total_level() - u32::from(current.level);
        let headroom = u32::from(MAX_TOTAL_LEVEL).saturating_sub(others);
        let ceiling = u8::try_from(headroom).unwrap_or(MAX_TOTAL_LEVEL);
        let level = level.clamp(MIN_CLASS_LEVEL, ceiling.max(MIN_CLASS_LEVEL));

        let entry = ClassEntry {
            level,
            ..current.clone()
        };
        self.update_class(index, entry)
    }

    /// Replace the chosen skills, dropping any the background already grants
    pub fn set_chosen_skills<I, S>(&mut self, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chosen_skills = skills
            .into_iter()
            .map(Into::into)
            .filter(|skill| !self.granted_skills.contains(skill))
            .collect();
        self.draft = WizardDraft {
            chosen_skills,
            ..self.draft.clone()
        };
    }

    /// Pick a background from the catalog; its granted skills leave the
    /// chosen set
    pub fn select_background(&mut self, background: &Background) {
        self.granted_skills = background.skill_proficiencies.iter().cloned().collect();
        let chosen_skills = self
            .draft
            .chosen_skills
            .difference(&self.granted_skills)
            .cloned()
            .collect();
        self.draft = WizardDraft {
            background_slug: background.slug.clone(),
            chosen_skills,
            ..self.draft.clone()
        };
    }

    /// Change race or subrace, keeping ability bases.
    ///
    /// Picking a different race also resets the age to that race's typical
    /// age.
    pub fn set_race(&mut self, race: RaceChoice) {
        self.draft = with_race(&self.draft, race);
    }

    pub fn select_race(&mut self, slug: &str) {
        self.set_race(RaceChoice::new(slug));
    }

    pub fn select_subrace(&mut self, subrace_slug: &str) {
        let race = self.draft.race.clone().with_subrace(subrace_slug);
        self.set_race(race);
    }

    pub fn set_custom_race(&mut self, name: &str) {
        self.set_race(RaceChoice::custom(name));
    }

    pub fn switch_method(&mut self, method: ScoreMethod) -> Adjustment {
        self.draft = ability_engine::switch_method(&self.draft, method);
        Adjustment::Accepted
    }

    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Adjustment {
        let result = ability_engine::roll(&self.draft, rng);
        self.commit(result)
    }

    pub fn reassign(&mut self, slot: usize, ability: Ability) -> Adjustment {
        let result = ability_engine::reassign(&self.draft, slot, ability);
        self.commit(result)
    }

    pub fn clear_slot(&mut self, ability: Ability) -> Adjustment {
        let result = ability_engine::clear_slot(&self.draft, ability);
        self.commit(result)
    }

    pub fn adjust_point_buy(&mut self, ability: Ability, delta: i32) -> Adjustment {
        let result = ability_engine::adjust_point_buy(&self.draft, ability, delta);
        self.commit(result)
    }

    /// Fill the identity, race, class and scores with random picks from the
    /// loaded catalog. Confirms the ruleset.
    pub fn random_fill<R: Rng + ?Sized>(
        &mut self,
        races: &[Race],
        classes: &[CharClass],
        backgrounds: &[Background],
        rng: &mut R,
    ) -> Adjustment {
        let (Some(race), Some(class), Some(background)) = (
            races.choose(rng),
            classes.choose(rng),
            backgrounds.choose(rng),
        ) else {
            return Adjustment::Rejected(DraftRejection::CatalogNotLoaded);
        };

        let mut race_choice = RaceChoice::new(race.slug.clone());
        if let Some(subrace) = race.subraces.choose(rng) {
            race_choice = race_choice.with_subrace(subrace.slug.clone());
        }
        let range = age_range(&race.slug);
        let spread = f64::from(range.max - range.min) * 0.4;
        let age = range.min + (rng.gen::<f64>() * spread) as u32;

        let mut order: Vec<usize> = (0..STANDARD_ARRAY.len()).collect();
        order.shuffle(rng);

        let name = pick(&RANDOM_NAMES, rng);
        let gender = pick(&GENDERS, rng);
        let alignment = pick(&ALIGNMENTS, rng);

        self.ruleset_confirmed = true;
        self.granted_skills = background.skill_proficiencies.iter().cloned().collect();
        let mut draft = WizardDraft {
            name,
            gender,
            race: race_choice,
            age: age.to_string(),
            class_entries: vec![ClassEntry::new(class.slug.clone(), MIN_CLASS_LEVEL)],
            class_custom_name: String::new(),
            background_slug: background.slug.clone(),
            chosen_skills: self
                .draft
                .chosen_skills
                .difference(&self.granted_skills)
                .cloned()
                .collect(),
            alignment,
            score_method: ScoreMethod::Standard,
            score_rolls: Vec::new(),
            ..self.draft.clone()
        };

        let bonuses = ability_engine::bonuses_for(&draft);
        let mut slots = AbilitySlots::unassigned();
        let mut values = [0; 6];
        for (ability, slot) in Ability::ALL.into_iter().zip(order) {
            slots = slots.with(ability, Some(slot));
            values[ability.index()] = STANDARD_ARRAY[slot] + bonuses.get(ability);
        }
        draft.ability_slots = slots;
        draft.ability_scores = AbilityScores::from_array(values);

        self.draft = draft;
        Adjustment::Accepted
    }

    fn replace_entries(&mut self, class_entries: Vec<ClassEntry>) -> Adjustment {
        self.draft = WizardDraft {
            class_entries,
            ..self.draft.clone()
        };
        Adjustment::Accepted
    }

    fn commit(&mut self, result: Result<WizardDraft, Rejection>) -> Adjustment {
        match result {
            Ok(draft) => {
                self.draft = draft;
                Adjustment::Accepted
            }
            Err(rejection) => Adjustment::Rejected(rejection.into()),
        }
    }
}

/// New race with bases kept; a different race resets age to its typical age
fn with_race(draft: &WizardDraft, race: RaceChoice) -> WizardDraft {
    let race_changed = race.slug != draft.race.slug;
    let mut next = WizardDraft {
        race,
        ..draft.clone()
    };
    if race_changed {
        next.age = age_range(&next.race.slug).typical.to_string();
    }
    ability_engine::rebase_for_race(draft, &next)
}

fn pick<R: Rng + ?Sized>(values: &[&str], rng: &mut R) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

fn fresh_draft(ruleset: &str) -> WizardDraft {
    WizardDraft {
        ruleset_slug: ruleset.to_string(),
        ..WizardDraft::default()
    }
}
