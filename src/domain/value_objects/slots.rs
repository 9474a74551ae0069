//! Which source slot each ability currently holds under standard/roll

use serde::{Deserialize, Serialize};

use super::ability::Ability;

/// Number of source values produced by the standard array or a roll
pub const SLOT_COUNT: usize = 6;

/// Per-ability slot index, `None` while the ability is unassigned.
///
/// Invariant: no slot index appears twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlots([Option<u8>; SLOT_COUNT]);

impl AbilitySlots {
    pub fn unassigned() -> Self {
        Self::default()
    }

    /// Slot `i` assigned to the `i`-th ability in sheet order
    pub fn in_order() -> Self {
        let mut slots = [None; SLOT_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = Some(i as u8);
        }
        Self(slots)
    }

    pub fn slot_of(&self, ability: Ability) -> Option<usize> {
        self.0[ability.index()].map(usize::from)
    }

    /// Ability currently holding `slot`
    pub fn holder_of(&self, slot: usize) -> Option<Ability> {
        Ability::ALL
            .into_iter()
            .find(|a| self.slot_of(*a) == Some(slot))
    }

    pub fn with(&self, ability: Ability, slot: Option<usize>) -> Self {
        let mut slots = self.0;
        slots[ability.index()] = slot.map(|s| s as u8);
        Self(slots)
    }

    pub fn is_used(&self, slot: usize) -> bool {
        self.holder_of(slot).is_some()
    }

    /// Slots no ability holds, ascending
    pub fn free_slots(&self) -> Vec<usize> {
        (0..SLOT_COUNT).filter(|s| !self.is_used(*s)).collect()
    }

    pub fn unassigned_abilities(&self) -> Vec<Ability> {
        Ability::ALL
            .into_iter()
            .filter(|a| self.slot_of(*a).is_none())
            .collect()
    }

    pub fn all_assigned(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// True when every held slot is in range and held once
    pub fn is_consistent(&self) -> bool {
        let mut seen = [false; SLOT_COUNT];
        for slot in self.0.iter().flatten() {
            let slot = usize::from(*slot);
            if slot >= SLOT_COUNT || seen[slot] {
                return false;
            }
            seen[slot] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_assigns_every_slot() {
        let slots = AbilitySlots::in_order();
        assert!(slots.all_assigned());
        assert_eq!(slots.slot_of(Ability::Con), Some(2));
        assert_eq!(slots.holder_of(5), Some(Ability::Cha));
        assert!(slots.free_slots().is_empty());
    }

    #[test]
    fn test_free_slots_track_unassigned_abilities() {
        let slots = AbilitySlots::in_order()
            .with(Ability::Str, None)
            .with(Ability::Wis, None);
        assert_eq!(slots.free_slots(), vec![0, 4]);
        assert_eq!(slots.unassigned_abilities(), vec![Ability::Str, Ability::Wis]);
    }

    #[test]
    fn test_consistency_detects_duplicates() {
        let slots = AbilitySlots::unassigned()
            .with(Ability::Str, Some(1))
            .with(Ability::Dex, Some(1));
        assert!(!slots.is_consistent());
        assert!(AbilitySlots::in_order().is_consistent());
    }
}
