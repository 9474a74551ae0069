//! Value objects - Immutable objects defined by their attributes

mod ability;
mod ids;
mod rule_system;
mod score_method;
mod slots;

pub use ability::{format_modifier, modifier, Ability, AbilityBonuses, AbilityScores};
pub use ids::*;
pub use rule_system::{
    age_range, point_cost, racial_bonuses, AgeRange, ALIGNMENTS, CUSTOM_SLUG, CUSTOM_SLUG_PREFIX,
    DEFAULT_RULESET, GENDERS, MAX_BASE, MAX_CLASS_ENTRIES, MAX_TOTAL_LEVEL, MIN_BASE,
    MIN_CLASS_LEVEL, POINT_BUY_BUDGET, STANDARD_ARRAY,
};
pub use score_method::ScoreMethod;
pub use slots::{AbilitySlots, SLOT_COUNT};
