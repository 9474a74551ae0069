//! Derived statistics - read-only projections of a draft
//!
//! Nothing here mutates the draft. Catalog records are passed in by the
//! caller; unknown class slugs simply contribute nothing.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::entities::{Background, CharClass, ClassEntry, WizardDraft};
use crate::domain::value_objects::{modifier, Ability, AbilityScores};

/// `ceil(total_level / 4) + 1`
pub fn proficiency_bonus(total_level: u32) -> i32 {
    total_level.div_ceil(4) as i32 + 1
}

/// Average-roll hit points for one class entry.
///
/// First level takes the full hit die; every further level takes
/// `ceil(hit_die / 2) + 1`. The constitution modifier applies per level.
pub fn class_hit_points(hit_die: u8, level: u8, con_modifier: i32) -> i32 {
    let hit_die = i32::from(hit_die);
    let further_levels = i32::from(level.saturating_sub(1));
    let per_level = (hit_die + 1) / 2 + 1 + con_modifier;
    hit_die + con_modifier + further_levels * per_level
}

/// Estimated hit points across every class entry found in `classes`
pub fn estimated_hp(
    entries: &[ClassEntry],
    classes: &[CharClass],
    scores: &AbilityScores,
) -> i32 {
    let con = scores.modifier(Ability::Con);
    entries
        .iter()
        .filter_map(|entry| {
            classes
                .iter()
                .find(|c| c.slug == entry.class_slug)
                .map(|class| class_hit_points(class.hit_die, entry.level, con))
        })
        .sum()
}

/// A feature unlocked by some class level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassFeature<'a> {
    pub level: u8,
    pub name: &'a str,
    pub description: &'a str,
}

/// Features unlocked at or below a level, ascending.
///
/// Iteration is lazy and can be restarted with [`ClassFeatures::iter`].
#[derive(Debug, Clone, Copy)]
pub struct ClassFeatures<'a> {
    class: &'a CharClass,
    max_level: u8,
}

impl<'a> ClassFeatures<'a> {
    pub fn iter(&self) -> impl Iterator<Item = ClassFeature<'a>> + 'a {
        let class = self.class;
        (1..=self.max_level).flat_map(move |level| {
            class
                .features_at(level)
                .iter()
                .map(move |feature| ClassFeature {
                    level,
                    name: &feature.name,
                    description: &feature.description,
                })
        })
    }
}

impl<'a> IntoIterator for &ClassFeatures<'a> {
    type Item = ClassFeature<'a>;
    type IntoIter = Box<dyn Iterator<Item = ClassFeature<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

pub fn class_features(class: &CharClass, level: u8) -> ClassFeatures<'_> {
    ClassFeatures {
        class,
        max_level: level,
    }
}

/// Background skills followed by chosen class skills, without duplicates
pub fn aggregated_skills(
    background: Option<&Background>,
    chosen: &BTreeSet<String>,
) -> Vec<String> {
    let mut seen = BTreeSet::new();
    background
        .map(|b| b.skill_proficiencies.as_slice())
        .unwrap_or(&[])
        .iter()
        .chain(chosen.iter())
        .filter(|skill| seen.insert(skill.as_str()))
        .cloned()
        .collect()
}

/// A field that must be filled in before submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequiredField {
    Name,
    Race,
    Class,
    Background,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Race => "race",
            Self::Class => "class",
            Self::Background => "background",
        };
        f.write_str(label)
    }
}

pub fn missing_required_fields(draft: &WizardDraft) -> Vec<RequiredField> {
    let mut missing = Vec::new();
    if draft.name.trim().is_empty() {
        missing.push(RequiredField::Name);
    }
    if draft.race.is_empty() {
        missing.push(RequiredField::Race);
    }
    if draft
        .primary_class()
        .map_or(true, |c| c.class_slug.is_empty())
    {
        missing.push(RequiredField::Class);
    }
    if draft.background_slug.is_empty() {
        missing.push(RequiredField::Background);
    }
    missing
}

/// Everything the preview step shows, computed in one pass
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPreview {
    pub total_level: u32,
    pub proficiency_bonus: i32,
    pub estimated_hp: i32,
    pub modifiers: [(Ability, i32); 6],
    pub skills: Vec<String>,
    pub missing: Vec<RequiredField>,
}

pub fn preview(
    draft: &WizardDraft,
    classes: &[CharClass],
    backgrounds: &[Background],
) -> DraftPreview {
    let background = backgrounds
        .iter()
        .find(|b| b.slug == draft.background_slug);
    let modifiers = Ability::ALL.map(|a| (a, modifier(draft.ability_scores.get(a))));

    DraftPreview {
        total_level: draft.total_level(),
        proficiency_bonus: proficiency_bonus(draft.total_level()),
        estimated_hp: estimated_hp(&draft.class_entries, classes, &draft.ability_scores),
        modifiers,
        skills: aggregated_skills(background, &draft.chosen_skills),
        missing: missing_required_fields(draft),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FeatureEntry, RaceChoice};

    fn class(slug: &str, hit_die: u8) -> CharClass {
        CharClass {
            slug: slug.to_string(),
            name: slug.to_string(),
            hit_die,
            ..Default::default()
        }
    }

    #[test]
    fn test_proficiency_bonus_by_level() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn test_class_hit_points() {
        // d10, level 1, +2 con
        assert_eq!(class_hit_points(10, 1, 2), 12);
        // d10, level 3, +2 con: 12 + 2 * (5 + 1 + 2)
        assert_eq!(class_hit_points(10, 3, 2), 28);
        // d6 wizard, level 2, -1 con: 5 + (3 + 1 - 1)
        assert_eq!(class_hit_points(6, 2, -1), 8);
    }

    #[test]
    fn test_estimated_hp_multiclass() {
        let classes = vec![class("fighter", 10), class("wizard", 6)];
        let entries = vec![ClassEntry::new("fighter", 2), ClassEntry::new("wizard", 1)];
        let scores = AbilityScores::from_array([10; 6]).with(Ability::Con, 14);
        // fighter: 12 + 8, wizard: 6 + 2
        assert_eq!(estimated_hp(&entries, &classes, &scores), 28);
    }

    #[test]
    fn test_estimated_hp_ignores_unknown_classes() {
        let entries = vec![ClassEntry::new("custom", 3)];
        assert_eq!(estimated_hp(&entries, &[], &AbilityScores::from_array([10; 6])), 0);
    }

    #[test]
    fn test_class_features_are_restartable_and_ordered() {
        let mut fighter = class("fighter", 10);
        fighter.level_features.insert(
            "2".to_string(),
            vec![FeatureEntry {
                name: "Action Surge".to_string(),
                description: "Take one additional action".to_string(),
            }],
        );
        fighter.level_features.insert(
            "1".to_string(),
            vec![FeatureEntry {
                name: "Second Wind".to_string(),
                description: "Regain 1d10 + level hit points".to_string(),
            }],
        );
        fighter.level_features.insert(
            "3".to_string(),
            vec![FeatureEntry {
                name: "Martial Archetype".to_string(),
                description: String::new(),
            }],
        );

        let features = class_features(&fighter, 2);
        let names: Vec<&str> = features.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Second Wind", "Action Surge"]);

        let levels: Vec<u8> = (&features).into_iter().map(|f| f.level).collect();
        assert_eq!(levels, vec![1, 2]);
    }

    #[test]
    fn test_aggregated_skills_union() {
        let background = Background {
            slug: "acolyte".to_string(),
            skill_proficiencies: vec!["insight".to_string(), "religion".to_string()],
            ..Default::default()
        };
        let chosen: BTreeSet<String> = ["arcana", "insight"].iter().map(|s| s.to_string()).collect();
        let skills = aggregated_skills(Some(&background), &chosen);
        assert_eq!(skills, vec!["insight", "religion", "arcana"]);
        assert_eq!(aggregated_skills(None, &chosen), vec!["arcana", "insight"]);
    }

    #[test]
    fn test_missing_required_fields() {
        let draft = WizardDraft::default();
        assert_eq!(
            missing_required_fields(&draft),
            vec![
                RequiredField::Name,
                RequiredField::Race,
                RequiredField::Class,
                RequiredField::Background
            ]
        );

        let filled = WizardDraft {
            name: "Tarn".to_string(),
            race: RaceChoice::new("dwarf"),
            class_entries: vec![ClassEntry::new("cleric", 1)],
            background_slug: "acolyte".to_string(),
            ..WizardDraft::default()
        };
        assert!(missing_required_fields(&filled).is_empty());

        let no_race = WizardDraft {
            race: RaceChoice::new(""),
            ..filled
        };
        assert_eq!(missing_required_fields(&no_race), vec![RequiredField::Race]);
    }

    #[test]
    fn test_preview() {
        let draft = WizardDraft {
            class_entries: vec![ClassEntry::new("fighter", 5)],
            ..WizardDraft::default()
        };
        let preview = preview(&draft, &[class("fighter", 10)], &[]);
        assert_eq!(preview.total_level, 5);
        assert_eq!(preview.proficiency_bonus, 3);
        // con 13 -> +1: 11 + 4 * 7
        assert_eq!(preview.estimated_hp, 39);
        assert_eq!(preview.modifiers[0], (Ability::Str, 2));
    }
}
