//! Static rule tables for the 2014 fifth-edition ruleset
//!
//! These tables are read-only lookups. Catalog data fetched from the backend
//! (races, classes, backgrounds) lives in `domain::entities::catalog`.

use super::ability::{Ability, AbilityBonuses};

/// Ruleset selected when a new draft is created
pub const DEFAULT_RULESET: &str = "dnd5e_2014";

/// Source values of the standard array, highest first
pub const STANDARD_ARRAY: [i32; 6] = [15, 14, 13, 12, 10, 8];

/// Lowest base value any generation method may leave on an ability
pub const MIN_BASE: i32 = 8;
/// Highest base value purchasable with point buy
pub const MAX_BASE: i32 = 15;
/// Point-buy budget shared across all six abilities
pub const POINT_BUY_BUDGET: i32 = 27;

pub const MAX_CLASS_ENTRIES: usize = 3;
pub const MIN_CLASS_LEVEL: u8 = 1;
pub const MAX_TOTAL_LEVEL: u8 = 20;

/// Slug marking a player-named race or class
pub const CUSTOM_SLUG: &str = "custom";
/// Prefix used when a custom name is submitted in place of a slug
pub const CUSTOM_SLUG_PREFIX: &str = "custom__";

pub const ALIGNMENTS: [&str; 9] = [
    "lawful-good",
    "neutral-good",
    "chaotic-good",
    "lawful-neutral",
    "true-neutral",
    "chaotic-neutral",
    "lawful-evil",
    "neutral-evil",
    "chaotic-evil",
];

pub const GENDERS: [&str; 3] = ["male", "female", "unknown"];

/// Point-buy cost of a base value, `None` outside 8..=15
pub fn point_cost(base: i32) -> Option<i32> {
    match base {
        8 => Some(0),
        9 => Some(1),
        10 => Some(2),
        11 => Some(3),
        12 => Some(4),
        13 => Some(5),
        14 => Some(7),
        15 => Some(9),
        _ => None,
    }
}

/// Racial ability bonuses. A known subrace takes precedence over its race.
pub fn racial_bonuses(race_slug: &str, subrace_slug: &str) -> AbilityBonuses {
    if !subrace_slug.is_empty() {
        if let Some(bonuses) = bonus_entry(subrace_slug) {
            return bonuses;
        }
    }
    bonus_entry(race_slug).unwrap_or_default()
}

fn bonus_entry(slug: &str) -> Option<AbilityBonuses> {
    use Ability::*;

    let pairs: &[(Ability, i32)] = match slug {
        "human" => &[(Str, 1), (Dex, 1), (Con, 1), (Int, 1), (Wis, 1), (Cha, 1)],
        "elf" => &[(Dex, 2)],
        "high-elf" => &[(Dex, 2), (Int, 1)],
        "wood-elf" => &[(Dex, 2), (Wis, 1)],
        "dwarf" => &[(Con, 2)],
        "hill-dwarf" => &[(Con, 2), (Wis, 1)],
        "mountain-dwarf" => &[(Con, 2), (Str, 2)],
        "halfling" => &[(Dex, 2)],
        "lightfoot-halfling" => &[(Dex, 2), (Cha, 1)],
        "stout-halfling" => &[(Dex, 2), (Con, 1)],
        "gnome" => &[(Int, 2)],
        "rock-gnome" => &[(Int, 2), (Con, 1)],
        "forest-gnome" => &[(Int, 2), (Dex, 1)],
        "half-elf" => &[(Cha, 2)],
        "half-orc" => &[(Str, 2), (Con, 1)],
        "tiefling" => &[(Int, 1), (Cha, 2)],
        "dragonborn" => &[(Str, 2), (Cha, 1)],
        _ => return None,
    };
    Some(AbilityBonuses::from_pairs(pairs))
}

/// Age bounds for a race, in years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
    pub typical: u32,
}

pub fn age_range(race_slug: &str) -> AgeRange {
    let (min, max, typical) = match race_slug {
        "human" => (18, 80, 25),
        "elf" => (100, 700, 250),
        "dwarf" => (50, 350, 120),
        "halfling" => (20, 150, 40),
        "gnome" => (40, 400, 120),
        "half-elf" => (20, 180, 35),
        "half-orc" => (14, 75, 22),
        "tiefling" => (18, 100, 24),
        "dragonborn" => (15, 80, 25),
        _ => (1, 999, 25),
    };
    AgeRange { min, max, typical }
}
