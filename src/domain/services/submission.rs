//! Submission gating and payload construction

use std::fmt;

use crate::domain::entities::{Background, CharacterSubmission, Race, WizardDraft};
use crate::domain::services::ability_engine::scores_consistent;
use crate::domain::services::derived_stats::{
    aggregated_skills, missing_required_fields, RequiredField,
};
use crate::domain::value_objects::ScoreMethod;

/// Gender sent when the player left it blank
pub const UNSPECIFIED_GENDER: &str = "unknown";

/// Something that must be resolved before the draft can be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionBlocker {
    Missing(RequiredField),
    CustomRaceNameRequired,
    CustomClassNameRequired,
    SubraceRequired,
    ScoresIncomplete,
}

impl fmt::Display for SubmissionBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{field} is required"),
            Self::CustomRaceNameRequired => f.write_str("custom race needs a name"),
            Self::CustomClassNameRequired => f.write_str("custom class needs a name"),
            Self::SubraceRequired => f.write_str("the selected race requires a subrace"),
            Self::ScoresIncomplete => f.write_str("every ability needs a valid score"),
        }
    }
}

/// Everything preventing submission, empty when the draft is ready.
///
/// `races` is the loaded catalog; a race missing from it never requires a
/// subrace.
pub fn submission_blockers(draft: &WizardDraft, races: &[Race]) -> Vec<SubmissionBlocker> {
    let mut blockers: Vec<SubmissionBlocker> = missing_required_fields(draft)
        .into_iter()
        .map(SubmissionBlocker::Missing)
        .collect();

    if draft.race.is_custom() && draft.race.custom_name.trim().is_empty() {
        blockers.push(SubmissionBlocker::CustomRaceNameRequired);
    }
    if draft.primary_class_is_custom() && draft.class_custom_name.trim().is_empty() {
        blockers.push(SubmissionBlocker::CustomClassNameRequired);
    }

    let needs_subrace = races
        .iter()
        .find(|r| r.slug == draft.race.slug)
        .is_some_and(Race::requires_subrace);
    if needs_subrace && draft.race.subrace_slug.is_empty() {
        blockers.push(SubmissionBlocker::SubraceRequired);
    }

    if !scores_complete(draft) {
        blockers.push(SubmissionBlocker::ScoresIncomplete);
    }
    blockers
}

fn scores_complete(draft: &WizardDraft) -> bool {
    if !draft.ability_scores.all_positive() || !scores_consistent(draft) {
        return false;
    }
    match draft.score_method {
        ScoreMethod::Standard => draft.ability_slots.all_assigned(),
        ScoreMethod::Roll => !draft.score_rolls.is_empty() && draft.ability_slots.all_assigned(),
        ScoreMethod::PointBuy => true,
    }
}

/// Payload for the character create endpoint.
///
/// Custom race and class travel as `custom__<name>`; a blank or
/// non-numeric age is omitted.
pub fn build_submission(draft: &WizardDraft, background: Option<&Background>) -> CharacterSubmission {
    let gender = if draft.gender.trim().is_empty() {
        UNSPECIFIED_GENDER.to_string()
    } else {
        draft.gender.clone()
    };

    CharacterSubmission {
        name: draft.name.trim().to_string(),
        gender,
        age: draft.age.trim().parse().ok(),
        appearance: draft.appearance.clone(),
        ruleset_slug: draft.ruleset_slug.clone(),
        race_slug: draft.race.submission_slug(),
        subrace_slug: draft.race.subrace_slug.clone(),
        class_slug: draft.primary_class_submission_slug(),
        background_slug: draft.background_slug.clone(),
        alignment: draft.alignment.clone(),
        level: draft.total_level(),
        ability_method: draft.score_method.backend_value().to_string(),
        ability_scores: draft.ability_scores,
        skill_proficiencies: aggregated_skills(background, &draft.chosen_skills),
        personality_trait: draft.personality_traits.clone(),
        ideal: draft.ideals.clone(),
        bond: draft.bonds.clone(),
        flaw: draft.flaws.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ClassEntry, RaceChoice, Subrace};
    use crate::domain::services::ability_engine::switch_method;
    use crate::domain::value_objects::{Ability, AbilityScores, AbilitySlots, CUSTOM_SLUG};

    fn ready_draft() -> WizardDraft {
        let draft = WizardDraft {
            name: "  Tarn Ironfist ".to_string(),
            race: RaceChoice::new("dwarf").with_subrace("hill-dwarf"),
            class_entries: vec![ClassEntry::new("cleric", 2), ClassEntry::new("fighter", 1)],
            background_slug: "acolyte".to_string(),
            age: "120".to_string(),
            ..WizardDraft::default()
        };
        // Standard array in sheet order with hill dwarf bonuses applied
        switch_method(&draft, ScoreMethod::Standard)
    }

    fn ready_with_race(race: RaceChoice) -> WizardDraft {
        let draft = WizardDraft {
            race,
            ..ready_draft()
        };
        switch_method(&draft, ScoreMethod::Standard)
    }

    fn dwarf() -> Race {
        Race {
            slug: "dwarf".to_string(),
            name: "Dwarf".to_string(),
            has_subraces: true,
            subraces: vec![Subrace {
                slug: "hill-dwarf".to_string(),
                name: "Hill Dwarf".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_ready_draft_has_no_blockers() {
        assert!(submission_blockers(&ready_draft(), &[dwarf()]).is_empty());
    }

    #[test]
    fn test_empty_race_blocks_submission() {
        let draft = ready_with_race(RaceChoice::default());
        assert_eq!(
            submission_blockers(&draft, &[dwarf()]),
            vec![SubmissionBlocker::Missing(RequiredField::Race)]
        );
    }

    #[test]
    fn test_subrace_required_when_race_has_subraces() {
        let draft = ready_with_race(RaceChoice::new("dwarf"));
        assert_eq!(
            submission_blockers(&draft, &[dwarf()]),
            vec![SubmissionBlocker::SubraceRequired]
        );
        // Unknown to the catalog: nothing to require
        assert!(submission_blockers(&draft, &[]).is_empty());
    }

    #[test]
    fn test_custom_names_required() {
        let draft = WizardDraft {
            class_entries: vec![ClassEntry::new(CUSTOM_SLUG, 1)],
            ..ready_with_race(RaceChoice::custom(" "))
        };
        assert_eq!(
            submission_blockers(&draft, &[]),
            vec![
                SubmissionBlocker::CustomRaceNameRequired,
                SubmissionBlocker::CustomClassNameRequired
            ]
        );
    }

    #[test]
    fn test_unassigned_slot_blocks_submission() {
        let mut draft = ready_draft();
        draft.ability_slots = AbilitySlots::in_order().with(Ability::Wis, None);
        assert_eq!(
            submission_blockers(&draft, &[dwarf()]),
            vec![SubmissionBlocker::ScoresIncomplete]
        );
    }

    #[test]
    fn test_out_of_range_point_buy_blocks_submission() {
        let draft = WizardDraft {
            score_method: ScoreMethod::PointBuy,
            ability_scores: AbilityScores::from_array([18; 6]),
            ..ready_draft()
        };
        assert_eq!(
            submission_blockers(&draft, &[dwarf()]),
            vec![SubmissionBlocker::ScoresIncomplete]
        );
    }

    #[test]
    fn test_build_submission() {
        let background = Background {
            slug: "acolyte".to_string(),
            skill_proficiencies: vec!["insight".to_string(), "religion".to_string()],
            ..Default::default()
        };
        let mut draft = ready_draft();
        draft.chosen_skills.insert("medicine".to_string());

        let submission = build_submission(&draft, Some(&background));
        assert_eq!(submission.name, "Tarn Ironfist");
        assert_eq!(submission.gender, UNSPECIFIED_GENDER);
        assert_eq!(submission.age, Some(120));
        assert_eq!(submission.race_slug, "dwarf");
        assert_eq!(submission.subrace_slug, "hill-dwarf");
        assert_eq!(submission.class_slug, "cleric");
        assert_eq!(submission.level, 3);
        assert_eq!(submission.ability_method, "standard_array");
        assert_eq!(submission.skill_proficiencies, vec!["insight", "religion", "medicine"]);
    }

    #[test]
    fn test_submission_encodes_custom_choices() {
        let mut draft = ready_draft();
        draft.race = RaceChoice::custom("Shadowkin");
        draft.class_entries = vec![ClassEntry::new(CUSTOM_SLUG, 1)];
        draft.class_custom_name = "Hexblade".to_string();
        draft.age = "old".to_string();

        let submission = build_submission(&draft, None);
        assert_eq!(submission.race_slug, "custom__Shadowkin");
        assert_eq!(submission.class_slug, "custom__Hexblade");
        assert_eq!(submission.age, None);

        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get("age").is_none());
        assert_eq!(json["ability_scores"]["str"], 15);
    }
}
