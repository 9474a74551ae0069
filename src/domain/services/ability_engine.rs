//! Ability score engine
//!
//! Pure functions over a [`WizardDraft`]'s ability fields. Every operation
//! takes the current draft and returns a new one, or a [`Rejection`] that
//! leaves the caller's draft untouched.
//!
//! Stored scores always decompose as `base + racial_bonus(ability)`:
//! - standard/roll: `base` is the value of the slot the ability holds, or
//!   [`MIN_BASE`] while unassigned
//! - point buy: `base` is in `MIN_BASE..=MAX_BASE` and total cost stays
//!   within [`POINT_BUY_BUDGET`]

use rand::Rng;

use crate::domain::entities::WizardDraft;
use crate::domain::value_objects::{
    point_cost, racial_bonuses, Ability, AbilityBonuses, AbilityScores, AbilitySlots, ScoreMethod,
    MAX_BASE, MIN_BASE, POINT_BUY_BUDGET, SLOT_COUNT, STANDARD_ARRAY,
};

/// Why an ability operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("operation requires the {expected} method, draft uses {actual}")]
    WrongMethod {
        expected: ScoreMethod,
        actual: ScoreMethod,
    },
    #[error("no rolled values to assign yet")]
    NotRolled,
    #[error("slot {0} does not exist")]
    UnknownSlot(usize),
    #[error("base value cannot go below 8")]
    BelowMinimum,
    #[error("base value cannot go above 15")]
    AboveMaximum,
    #[error("costs {cost} points, budget is 27")]
    OverBudget { cost: i32 },
}

/// Racial bonuses for the draft's current race/subrace
pub fn bonuses_for(draft: &WizardDraft) -> AbilityBonuses {
    racial_bonuses(&draft.race.slug, &draft.race.subrace_slug)
}

/// Base value of an ability (stored score minus racial bonus)
pub fn base_value(draft: &WizardDraft, ability: Ability) -> i32 {
    draft.ability_scores.get(ability) - bonuses_for(draft).get(ability)
}

/// The six source values slots draw from, if the method has any yet
pub fn source_values(draft: &WizardDraft) -> Option<[i32; SLOT_COUNT]> {
    match draft.score_method {
        ScoreMethod::Standard => Some(STANDARD_ARRAY),
        ScoreMethod::Roll => <[i32; SLOT_COUNT]>::try_from(draft.score_rolls.as_slice()).ok(),
        ScoreMethod::PointBuy => None,
    }
}

/// Source slots not held by any ability
pub fn unassigned_slots(draft: &WizardDraft) -> Vec<usize> {
    match source_values(draft) {
        Some(_) => draft.ability_slots.free_slots(),
        None => Vec::new(),
    }
}

/// Final total of an ability, `None` while it holds no slot under standard/roll
pub fn assigned_total(draft: &WizardDraft, ability: Ability) -> Option<i32> {
    if draft.score_method.uses_slots() {
        source_values(draft)?;
        draft.ability_slots.slot_of(ability)?;
    }
    Some(draft.ability_scores.get(ability))
}

/// Roll one ability value: four d6, highest three summed
pub fn roll_ability<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    let mut dice: [i32; 4] = [0; 4];
    for die in dice.iter_mut() {
        *die = rng.gen_range(1..=6);
    }
    dice.sort_unstable();
    dice[1..].iter().sum()
}

/// Six rolled values, sorted highest first
pub fn roll_ability_set<R: Rng + ?Sized>(rng: &mut R) -> Vec<i32> {
    let mut rolls: Vec<i32> = (0..SLOT_COUNT).map(|_| roll_ability(rng)).collect();
    rolls.sort_unstable_by(|a, b| b.cmp(a));
    rolls
}

/// Scores with every base at the minimum plus racial bonus
fn minimum_scores(bonuses: &AbilityBonuses) -> AbilityScores {
    let mut values = [MIN_BASE; 6];
    for ability in Ability::ALL {
        values[ability.index()] += bonuses.get(ability);
    }
    AbilityScores::from_array(values)
}

fn require_method(draft: &WizardDraft, expected: ScoreMethod) -> Result<(), Rejection> {
    if draft.score_method == expected {
        Ok(())
    } else {
        Err(Rejection::WrongMethod {
            expected,
            actual: draft.score_method,
        })
    }
}

/// Switch generation method.
///
/// Every base resets to the minimum plus racial bonus and rolls are cleared.
/// Switching to standard assigns the array in sheet order instead.
pub fn switch_method(draft: &WizardDraft, method: ScoreMethod) -> WizardDraft {
    let bonuses = bonuses_for(draft);
    let (slots, scores) = match method {
        ScoreMethod::Standard => {
            let mut values = STANDARD_ARRAY;
            for ability in Ability::ALL {
                values[ability.index()] += bonuses.get(ability);
            }
            (AbilitySlots::in_order(), AbilityScores::from_array(values))
        }
        ScoreMethod::Roll | ScoreMethod::PointBuy => {
            (AbilitySlots::unassigned(), minimum_scores(&bonuses))
        }
    };

    WizardDraft {
        score_method: method,
        score_rolls: Vec::new(),
        ability_slots: slots,
        ability_scores: scores,
        ..draft.clone()
    }
}

/// Replace the rolled values with a fresh draw; all abilities return to the pool
pub fn apply_rolls(draft: &WizardDraft, rolls: Vec<i32>) -> Result<WizardDraft, Rejection> {
    require_method(draft, ScoreMethod::Roll)?;
    if rolls.len() != SLOT_COUNT {
        return Err(Rejection::NotRolled);
    }
    Ok(WizardDraft {
        score_rolls: rolls,
        ability_slots: AbilitySlots::unassigned(),
        ability_scores: minimum_scores(&bonuses_for(draft)),
        ..draft.clone()
    })
}

/// Roll six new values with `rng` and apply them
pub fn roll<R: Rng + ?Sized>(draft: &WizardDraft, rng: &mut R) -> Result<WizardDraft, Rejection> {
    require_method(draft, ScoreMethod::Roll)?;
    apply_rolls(draft, roll_ability_set(rng))
}

/// Assign source `slot` to `ability`.
///
/// If another ability holds the slot it receives whatever slot `ability` is
/// vacating; if `ability` held none, the displaced ability returns to the
/// pool at the minimum base.
pub fn reassign(
    draft: &WizardDraft,
    slot: usize,
    ability: Ability,
) -> Result<WizardDraft, Rejection> {
    if !draft.score_method.uses_slots() {
        return Err(Rejection::WrongMethod {
            expected: ScoreMethod::Standard,
            actual: draft.score_method,
        });
    }
    let sources = source_values(draft).ok_or(Rejection::NotRolled)?;
    if slot >= SLOT_COUNT {
        return Err(Rejection::UnknownSlot(slot));
    }

    let bonuses = bonuses_for(draft);
    let vacated = draft.ability_slots.slot_of(ability);
    let displaced = draft
        .ability_slots
        .holder_of(slot)
        .filter(|holder| *holder != ability);

    let mut slots = draft.ability_slots.with(ability, Some(slot));
    let mut scores = draft
        .ability_scores
        .with(ability, sources[slot] + bonuses.get(ability));

    if let Some(other) = displaced {
        slots = slots.with(other, vacated);
        let base = vacated.map(|s| sources[s]).unwrap_or(MIN_BASE);
        scores = scores.with(other, base + bonuses.get(other));
    }

    Ok(WizardDraft {
        ability_slots: slots,
        ability_scores: scores,
        ..draft.clone()
    })
}

/// Return an ability's slot to the pool
pub fn clear_slot(draft: &WizardDraft, ability: Ability) -> Result<WizardDraft, Rejection> {
    if !draft.score_method.uses_slots() {
        return Err(Rejection::WrongMethod {
            expected: ScoreMethod::Standard,
            actual: draft.score_method,
        });
    }
    let bonus = bonuses_for(draft).get(ability);
    Ok(WizardDraft {
        ability_slots: draft.ability_slots.with(ability, None),
        ability_scores: draft.ability_scores.with(ability, MIN_BASE + bonus),
        ..draft.clone()
    })
}

/// Total point-buy cost of the current bases
pub fn point_buy_spent(draft: &WizardDraft) -> i32 {
    Ability::ALL
        .into_iter()
        .map(|a| point_cost(base_value(draft, a)).unwrap_or(0))
        .sum()
}

pub fn point_buy_remaining(draft: &WizardDraft) -> i32 {
    POINT_BUY_BUDGET - point_buy_spent(draft)
}

/// Move one ability's point-buy base by `delta`
pub fn adjust_point_buy(
    draft: &WizardDraft,
    ability: Ability,
    delta: i32,
) -> Result<WizardDraft, Rejection> {
    require_method(draft, ScoreMethod::PointBuy)?;

    let base = base_value(draft, ability);
    let new_base = base + delta;
    if new_base < MIN_BASE {
        return Err(Rejection::BelowMinimum);
    }
    if new_base > MAX_BASE {
        return Err(Rejection::AboveMaximum);
    }

    // Only the adjusted ability changes, so swap its cost in place
    let old_cost = point_cost(base).unwrap_or(0);
    let new_cost = point_cost(new_base).unwrap_or(0);
    let total = point_buy_spent(draft) - old_cost + new_cost;
    if total > POINT_BUY_BUDGET {
        return Err(Rejection::OverBudget { cost: total });
    }

    let bonus = bonuses_for(draft).get(ability);
    Ok(WizardDraft {
        ability_scores: draft.ability_scores.with(ability, new_base + bonus),
        ..draft.clone()
    })
}

pub fn can_increase(draft: &WizardDraft, ability: Ability) -> bool {
    adjust_point_buy(draft, ability, 1).is_ok()
}

pub fn can_decrease(draft: &WizardDraft, ability: Ability) -> bool {
    adjust_point_buy(draft, ability, -1).is_ok()
}

/// Re-apply racial bonuses after the race changed, keeping every base
pub fn rebase_for_race(previous: &WizardDraft, next: &WizardDraft) -> WizardDraft {
    let old = bonuses_for(previous);
    let new = bonuses_for(next);
    let mut values = previous.ability_scores.to_array();
    for ability in Ability::ALL {
        values[ability.index()] += new.get(ability) - old.get(ability);
    }
    WizardDraft {
        ability_scores: AbilityScores::from_array(values),
        ..next.clone()
    }
}

/// Check the score invariants for the draft's method
pub fn scores_consistent(draft: &WizardDraft) -> bool {
    let bonuses = bonuses_for(draft);
    match draft.score_method {
        ScoreMethod::PointBuy => {
            Ability::ALL.into_iter().all(|a| {
                let base = base_value(draft, a);
                (MIN_BASE..=MAX_BASE).contains(&base)
            }) && point_buy_spent(draft) <= POINT_BUY_BUDGET
        }
        ScoreMethod::Standard | ScoreMethod::Roll => {
            let Some(sources) = source_values(draft) else {
                // Nothing rolled yet: every ability sits in the pool
                return draft.ability_slots == AbilitySlots::unassigned()
                    && Ability::ALL
                        .into_iter()
                        .all(|a| draft.ability_scores.get(a) == MIN_BASE + bonuses.get(a));
            };
            draft.ability_slots.is_consistent()
                && Ability::ALL.into_iter().all(|a| {
                    let base = draft
                        .ability_slots
                        .slot_of(a)
                        .map(|s| sources[s])
                        .unwrap_or(MIN_BASE);
                    draft.ability_scores.get(a) == base + bonuses.get(a)
                })
        }
    }
}

/// Infer slot ownership from stored scores.
///
/// Each ability, in sheet order, claims the first free slot whose value
/// matches its base. Used for drafts saved before slots were tracked.
pub fn infer_slots(draft: &WizardDraft) -> AbilitySlots {
    let Some(sources) = source_values(draft) else {
        return AbilitySlots::unassigned();
    };
    let mut slots = AbilitySlots::unassigned();
    for ability in Ability::ALL {
        let base = base_value(draft, ability);
        if let Some(slot) = (0..SLOT_COUNT).find(|s| !slots.is_used(*s) && sources[*s] == base) {
            slots = slots.with(ability, Some(slot));
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RaceChoice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn draft_with_race(race: &str, subrace: &str) -> WizardDraft {
        let draft = WizardDraft {
            race: RaceChoice::new(race).with_subrace(subrace),
            ..WizardDraft::default()
        };
        // Re-derive scores for the race through a method switch
        switch_method(&draft, draft.score_method)
    }

    fn assigned_bases(draft: &WizardDraft) -> Vec<i32> {
        let sources = source_values(draft).unwrap();
        let mut bases: Vec<i32> = Ability::ALL
            .into_iter()
            .filter_map(|a| draft.ability_slots.slot_of(a).map(|s| sources[s]))
            .collect();
        bases.sort_unstable();
        bases
    }

    #[test]
    fn test_roll_ability_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let value = roll_ability(&mut rng);
            assert!((3..=18).contains(&value));
        }
    }

    #[test]
    fn test_roll_set_sorted_descending() {
        let mut rng = StdRng::seed_from_u64(42);
        let rolls = roll_ability_set(&mut rng);
        assert_eq!(rolls.len(), 6);
        assert!(rolls.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_switch_method_resets_bases_and_rolls() {
        let draft = draft_with_race("dwarf", "");
        let mut rng = StdRng::seed_from_u64(1);
        let rolled = roll(&switch_method(&draft, ScoreMethod::Roll), &mut rng).unwrap();
        assert_eq!(rolled.score_rolls.len(), 6);

        let switched = switch_method(&rolled, ScoreMethod::PointBuy);
        assert!(switched.score_rolls.is_empty());
        for ability in Ability::ALL {
            assert_eq!(base_value(&switched, ability), MIN_BASE);
        }
        assert_eq!(switched.ability_scores.con, 10);
    }

    #[test]
    fn test_switch_to_standard_assigns_in_order() {
        let draft = draft_with_race("half-orc", "");
        let switched = switch_method(&switch_method(&draft, ScoreMethod::PointBuy), ScoreMethod::Standard);
        assert_eq!(switched.ability_scores.str, 17);
        assert_eq!(switched.ability_scores.dex, 14);
        assert_eq!(switched.ability_scores.con, 14);
        assert_eq!(switched.ability_scores.cha, 8);
        assert!(switched.ability_slots.all_assigned());
        assert!(scores_consistent(&switched));
    }

    #[test]
    fn test_reassign_to_unassigned_ability_returns_holder_to_pool() {
        let draft = WizardDraft::default();
        let draft = clear_slot(&draft, Ability::Str).unwrap();
        let draft = clear_slot(&draft, Ability::Dex).unwrap();
        assert_eq!(unassigned_slots(&draft), vec![0, 1]);

        let draft = reassign(&draft, 0, Ability::Str).unwrap();
        assert_eq!(draft.ability_scores.str, 15);

        let draft = reassign(&draft, 0, Ability::Dex).unwrap();
        assert_eq!(draft.ability_scores.str, MIN_BASE);
        assert_eq!(draft.ability_scores.dex, 15);
        assert_eq!(assigned_total(&draft, Ability::Str), None);
        assert_eq!(
            unassigned_slots(&draft).len(),
            draft.ability_slots.unassigned_abilities().len()
        );
    }

    #[test]
    fn test_reassign_swaps_between_assigned_abilities() {
        let draft = draft_with_race("elf", "high-elf");
        // str holds 15, int holds 12
        let swapped = reassign(&draft, 0, Ability::Int).unwrap();
        assert_eq!(swapped.ability_scores.int, 15 + 1);
        assert_eq!(swapped.ability_scores.str, 12);
        assert_eq!(assigned_bases(&swapped), vec![8, 10, 12, 13, 14, 15]);
        assert!(scores_consistent(&swapped));
    }

    #[test]
    fn test_reassign_same_slot_is_noop() {
        let draft = WizardDraft::default();
        let again = reassign(&draft, 0, Ability::Str).unwrap();
        assert_eq!(again, draft);
    }

    #[test]
    fn test_reassign_never_duplicates_slots() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut draft = switch_method(&WizardDraft::default(), ScoreMethod::Roll);
        draft = roll(&draft, &mut rng).unwrap();
        for step in 0..60 {
            let slot = rng.gen_range(0..SLOT_COUNT);
            let ability = Ability::ALL[rng.gen_range(0..6)];
            draft = if step % 7 == 0 {
                clear_slot(&draft, ability).unwrap()
            } else {
                reassign(&draft, slot, ability).unwrap()
            };
            assert!(draft.ability_slots.is_consistent());
            assert!(scores_consistent(&draft));
        }
    }

    #[test]
    fn test_reassign_requires_rolls() {
        let draft = switch_method(&WizardDraft::default(), ScoreMethod::Roll);
        assert_eq!(reassign(&draft, 0, Ability::Str), Err(Rejection::NotRolled));
        assert!(unassigned_slots(&draft).is_empty());
    }

    #[test]
    fn test_reassign_rejects_point_buy_and_bad_slot() {
        let draft = switch_method(&WizardDraft::default(), ScoreMethod::PointBuy);
        assert!(matches!(
            reassign(&draft, 0, Ability::Str),
            Err(Rejection::WrongMethod { .. })
        ));
        assert_eq!(
            reassign(&WizardDraft::default(), 6, Ability::Str),
            Err(Rejection::UnknownSlot(6))
        );
    }

    #[test]
    fn test_point_buy_dwarf_constitution() {
        let draft = switch_method(&draft_with_race("dwarf", ""), ScoreMethod::PointBuy);
        let draft = adjust_point_buy(&draft, Ability::Con, 1).unwrap();
        let draft = adjust_point_buy(&draft, Ability::Con, 1).unwrap();
        assert_eq!(base_value(&draft, Ability::Con), 10);
        let before = point_buy_spent(&draft);

        let draft = adjust_point_buy(&draft, Ability::Con, 1).unwrap();
        assert_eq!(draft.ability_scores.con, 13);
        assert_eq!(point_buy_spent(&draft) - before, 1);
    }

    #[test]
    fn test_point_buy_bounds() {
        let draft = switch_method(&WizardDraft::default(), ScoreMethod::PointBuy);
        assert_eq!(
            adjust_point_buy(&draft, Ability::Str, -1),
            Err(Rejection::BelowMinimum)
        );
        assert!(!can_decrease(&draft, Ability::Str));

        let mut maxed = draft.clone();
        for _ in 0..7 {
            maxed = adjust_point_buy(&maxed, Ability::Str, 1).unwrap();
        }
        assert_eq!(maxed.ability_scores.str, 15);
        assert_eq!(
            adjust_point_buy(&maxed, Ability::Str, 1),
            Err(Rejection::AboveMaximum)
        );
    }

    #[test]
    fn test_point_buy_budget_never_exceeded() {
        let mut draft = switch_method(&WizardDraft::default(), ScoreMethod::PointBuy);
        let mut rejected = 0;
        for ability in Ability::ALL.into_iter().cycle().take(60) {
            match adjust_point_buy(&draft, ability, 1) {
                Ok(next) => draft = next,
                Err(Rejection::OverBudget { .. }) | Err(Rejection::AboveMaximum) => rejected += 1,
                Err(other) => panic!("unexpected rejection: {other}"),
            }
            assert!(point_buy_spent(&draft) <= POINT_BUY_BUDGET);
        }
        assert!(rejected > 0);
        assert!(scores_consistent(&draft));
    }

    #[test]
    fn test_point_buy_rejection_leaves_draft_unchanged() {
        let mut draft = switch_method(&WizardDraft::default(), ScoreMethod::PointBuy);
        // 15, 15, 15 costs 27
        for ability in [Ability::Str, Ability::Dex, Ability::Con] {
            for _ in 0..7 {
                draft = adjust_point_buy(&draft, ability, 1).unwrap();
            }
        }
        assert_eq!(point_buy_remaining(&draft), 0);
        let snapshot = draft.clone();
        assert!(matches!(
            adjust_point_buy(&draft, Ability::Wis, 1),
            Err(Rejection::OverBudget { cost: 28 })
        ));
        assert!(!can_increase(&draft, Ability::Wis));
        assert_eq!(draft, snapshot);
    }

    #[test]
    fn test_point_buy_requires_method() {
        let draft = WizardDraft::default();
        assert!(matches!(
            adjust_point_buy(&draft, Ability::Str, 1),
            Err(Rejection::WrongMethod { .. })
        ));
    }

    #[test]
    fn test_rebase_for_race_keeps_bases() {
        let before = switch_method(&WizardDraft::default(), ScoreMethod::Standard);
        let after_race = WizardDraft {
            race: RaceChoice::new("dragonborn"),
            ..before.clone()
        };
        let rebased = rebase_for_race(&before, &after_race);
        assert_eq!(rebased.ability_scores.str, 17);
        assert_eq!(rebased.ability_scores.cha, 9);
        assert!(scores_consistent(&rebased));
    }

    #[test]
    fn test_infer_slots_matches_first_free_value() {
        let draft = WizardDraft {
            ability_slots: AbilitySlots::unassigned(),
            ability_scores: AbilityScores::from_array([8, 14, 13, 12, 10, 15]),
            ..WizardDraft::default()
        };
        let slots = infer_slots(&draft);
        assert_eq!(slots.slot_of(Ability::Str), Some(5));
        assert_eq!(slots.slot_of(Ability::Cha), Some(0));
        assert!(slots.all_assigned());
    }
}
