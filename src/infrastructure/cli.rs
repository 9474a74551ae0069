//! Wizard steps driven from the command line
//!
//! `charforge draft <step> ...` is parsed into a [`DraftCommand`] and applied
//! to the draft store inside one wizard edit, so every step goes through the
//! same validation and persistence as any other edit. Class and slot indices
//! are 1-based on the command line.

use rand::Rng;

use crate::application::services::{Adjustment, Catalog, DraftRejection, DraftStore};
use crate::domain::entities::{ClassEntry, DraftPatch};
use crate::domain::value_objects::{Ability, ScoreMethod, CUSTOM_SLUG, MIN_CLASS_LEVEL};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown draft step: {0}")]
    UnknownStep(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("No race '{0}' in the game data")]
    UnknownRace(String),
    #[error("No subrace '{0}' for the selected race")]
    UnknownSubrace(String),
    #[error("No class '{0}' in the game data")]
    UnknownClass(String),
    #[error("No background '{0}' in the game data")]
    UnknownBackground(String),
}

/// Free-text draft fields set verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Gender,
    Age,
    Alignment,
    Appearance,
    Traits,
    Ideals,
    Bonds,
    Flaws,
    ClassName,
}

impl TextField {
    fn from_step(step: &str) -> Option<Self> {
        let field = match step {
            "name" => Self::Name,
            "gender" => Self::Gender,
            "age" => Self::Age,
            "alignment" => Self::Alignment,
            "appearance" => Self::Appearance,
            "traits" => Self::Traits,
            "ideals" => Self::Ideals,
            "bonds" => Self::Bonds,
            "flaws" => Self::Flaws,
            "class-name" => Self::ClassName,
            _ => return None,
        };
        Some(field)
    }

    fn patch(self, value: String) -> DraftPatch {
        let mut patch = DraftPatch::default();
        let slot = match self {
            Self::Name => &mut patch.name,
            Self::Gender => &mut patch.gender,
            Self::Age => &mut patch.age,
            Self::Alignment => &mut patch.alignment,
            Self::Appearance => &mut patch.appearance,
            Self::Traits => &mut patch.personality_traits,
            Self::Ideals => &mut patch.ideals,
            Self::Bonds => &mut patch.bonds,
            Self::Flaws => &mut patch.flaws,
            Self::ClassName => &mut patch.class_custom_name,
        };
        *slot = Some(value);
        patch
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftCommand {
    Text(TextField, String),
    Ruleset(String),
    ConfirmRuleset,
    Race(String),
    Subrace(String),
    CustomRace(String),
    AddClass,
    RemoveClass(usize),
    SetClass(usize, String),
    ClassLevel(usize, u8),
    Background(String),
    Skills(Vec<String>),
    Method(ScoreMethod),
    Roll,
    Assign { slot: usize, ability: Ability },
    Clear(Ability),
    Buy { ability: Ability, delta: i32 },
}

impl DraftCommand {
    pub fn parse(args: &[&str]) -> Result<Self, CommandError> {
        let command = match args {
            [step, value @ ..] if TextField::from_step(step).is_some() && !value.is_empty() => {
                let field = TextField::from_step(step).ok_or_else(|| unknown(args))?;
                Self::Text(field, value.join(" "))
            }
            ["ruleset", slug] => Self::Ruleset(slug.to_string()),
            ["confirm"] => Self::ConfirmRuleset,
            ["race", slug] => Self::Race(slug.to_string()),
            ["subrace", slug] => Self::Subrace(slug.to_string()),
            ["custom-race", name @ ..] if !name.is_empty() => Self::CustomRace(name.join(" ")),
            ["class", "add"] => Self::AddClass,
            ["class", "remove", index] => Self::RemoveClass(parse_index(index)?),
            ["class", "set", index, slug] => Self::SetClass(parse_index(index)?, slug.to_string()),
            ["class", "level", index, level] => {
                Self::ClassLevel(parse_index(index)?, parse_number(level)?)
            }
            ["background", slug] => Self::Background(slug.to_string()),
            ["skills", list] => Self::Skills(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            ["method", method] => {
                Self::Method(method.parse().map_err(CommandError::InvalidArgument)?)
            }
            ["roll"] => Self::Roll,
            ["assign", slot, ability] => Self::Assign {
                slot: parse_index(slot)?,
                ability: parse_ability(ability)?,
            },
            ["clear", ability] => Self::Clear(parse_ability(ability)?),
            ["buy", ability, delta] => Self::Buy {
                ability: parse_ability(ability)?,
                delta: parse_number(delta)?,
            },
            _ => return Err(unknown(args)),
        };
        Ok(command)
    }

    /// Steps that look things up in the game data
    pub fn needs_catalog(&self) -> bool {
        matches!(
            self,
            Self::Race(_)
                | Self::Subrace(_)
                | Self::SetClass(..)
                | Self::Background(_)
                | Self::Skills(_)
        )
    }

    pub fn apply<R: Rng + ?Sized>(
        &self,
        store: &mut DraftStore,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<Adjustment, CommandError> {
        if self.needs_catalog() && !catalog.loaded {
            return Ok(Adjustment::Rejected(DraftRejection::CatalogNotLoaded));
        }

        let outcome = match self {
            Self::Text(field, value) => store.update(field.patch(value.clone())),
            Self::Ruleset(slug) => store.update(DraftPatch {
                ruleset_slug: Some(slug.clone()),
                ..DraftPatch::default()
            }),
            Self::ConfirmRuleset => {
                store.confirm_ruleset();
                Adjustment::Accepted
            }
            Self::Race(slug) => {
                catalog
                    .race(slug)
                    .ok_or_else(|| CommandError::UnknownRace(slug.clone()))?;
                store.select_race(slug);
                Adjustment::Accepted
            }
            Self::Subrace(slug) => {
                let race_slug = store.draft().race.slug.clone();
                catalog
                    .race(&race_slug)
                    .and_then(|race| race.subrace(slug))
                    .ok_or_else(|| CommandError::UnknownSubrace(slug.clone()))?;
                store.select_subrace(slug);
                Adjustment::Accepted
            }
            Self::CustomRace(name) => {
                store.set_custom_race(name);
                Adjustment::Accepted
            }
            Self::AddClass => store.add_class(),
            Self::RemoveClass(index) => store.remove_class(*index),
            Self::SetClass(index, slug) => {
                if slug != CUSTOM_SLUG && catalog.class(slug).is_none() {
                    return Err(CommandError::UnknownClass(slug.clone()));
                }
                let level = store
                    .draft()
                    .class_entries
                    .get(*index)
                    .map_or(MIN_CLASS_LEVEL, |entry| entry.level);
                store.update_class(*index, ClassEntry::new(slug.clone(), level))
            }
            Self::ClassLevel(index, level) => store.set_class_level(*index, *level),
            Self::Background(slug) => {
                let background = catalog
                    .background(slug)
                    .ok_or_else(|| CommandError::UnknownBackground(slug.clone()))?;
                store.select_background(background);
                Adjustment::Accepted
            }
            Self::Skills(skills) => {
                // Restored drafts do not know their background's skills yet
                if let Some(background) = catalog.background(&store.draft().background_slug) {
                    store.select_background(background);
                }
                store.set_chosen_skills(skills.iter().cloned());
                Adjustment::Accepted
            }
            Self::Method(method) => store.switch_method(*method),
            Self::Roll => store.roll(rng),
            Self::Assign { slot, ability } => store.reassign(*slot, *ability),
            Self::Clear(ability) => store.clear_slot(*ability),
            Self::Buy { ability, delta } => store.adjust_point_buy(*ability, *delta),
        };
        Ok(outcome)
    }
}

fn unknown(args: &[&str]) -> CommandError {
    CommandError::UnknownStep(args.join(" "))
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidArgument(format!("not a number: {raw}")))
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    match parse_number::<usize>(raw)? {
        0 => Err(CommandError::InvalidArgument(
            "positions start at 1".to_string(),
        )),
        n => Ok(n - 1),
    }
}

fn parse_ability(raw: &str) -> Result<Ability, CommandError> {
    Ability::from_key(&raw.to_lowercase())
        .ok_or_else(|| CommandError::InvalidArgument(format!("unknown ability: {raw}")))
}
