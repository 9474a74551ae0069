//! Structural rules every wizard draft must satisfy
//!
//! Edits are checked against these before they are committed, and stored
//! drafts are checked after migration.

use crate::domain::entities::{ClassEntry, WizardDraft};
use crate::domain::services::ability_engine::scores_consistent;
use crate::domain::value_objects::{MAX_CLASS_ENTRIES, MAX_TOTAL_LEVEL, MIN_CLASS_LEVEL};

/// A broken draft invariant
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftViolation {
    #[error("A character needs at least one class")]
    NoClasses,
    #[error("A character can have at most 3 classes")]
    TooManyClasses,
    #[error("Class level must be at least 1")]
    InvalidLevel,
    #[error("Total level cannot exceed 20")]
    LevelCapExceeded,
    #[error("Ability scores do not match the score method")]
    InconsistentScores,
}

/// 1 to 3 entries, each at least level 1, levels summing to at most 20
pub fn check_class_entries(entries: &[ClassEntry]) -> Result<(), DraftViolation> {
    if entries.is_empty() {
        return Err(DraftViolation::NoClasses);
    }
    if entries.len() > MAX_CLASS_ENTRIES {
        return Err(DraftViolation::TooManyClasses);
    }
    if entries.iter().any(|e| e.level < MIN_CLASS_LEVEL) {
        return Err(DraftViolation::InvalidLevel);
    }
    let total: u32 = entries.iter().map(|e| u32::from(e.level)).sum();
    if total > u32::from(MAX_TOTAL_LEVEL) {
        return Err(DraftViolation::LevelCapExceeded);
    }
    Ok(())
}

/// Class list and ability score invariants together
pub fn check_draft(draft: &WizardDraft) -> Result<(), DraftViolation> {
    check_class_entries(&draft.class_entries)?;
    if !scores_consistent(draft) {
        return Err(DraftViolation::InconsistentScores);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AbilityScores, ScoreMethod};

    #[test]
    fn test_class_entry_rules() {
        assert_eq!(check_class_entries(&[]), Err(DraftViolation::NoClasses));
        assert_eq!(
            check_class_entries(&[
                ClassEntry::new("fighter", 1),
                ClassEntry::new("rogue", 1),
                ClassEntry::new("wizard", 1),
                ClassEntry::new("cleric", 1),
            ]),
            Err(DraftViolation::TooManyClasses)
        );
        assert_eq!(
            check_class_entries(&[ClassEntry::new("fighter", 3), ClassEntry::new("rogue", 0)]),
            Err(DraftViolation::InvalidLevel)
        );
        assert_eq!(
            check_class_entries(&[ClassEntry::new("fighter", 12), ClassEntry::new("rogue", 9)]),
            Err(DraftViolation::LevelCapExceeded)
        );
        assert!(check_class_entries(&[
            ClassEntry::new("fighter", 12),
            ClassEntry::new("rogue", 8)
        ])
        .is_ok());
    }

    #[test]
    fn test_default_draft_is_valid() {
        assert_eq!(check_draft(&WizardDraft::default()), Ok(()));
    }

    #[test]
    fn test_out_of_range_point_buy_is_inconsistent() {
        let draft = WizardDraft {
            score_method: ScoreMethod::PointBuy,
            ability_scores: AbilityScores::from_array([18; 6]),
            ..WizardDraft::default()
        };
        assert_eq!(check_draft(&draft), Err(DraftViolation::InconsistentScores));
    }
}
