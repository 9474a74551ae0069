//! Domain services - Pure operations over drafts and catalog records

pub mod ability_engine;
pub mod derived_stats;
pub mod draft_rules;
pub mod migration;
pub mod submission;

pub use ability_engine::Rejection;
pub use derived_stats::{
    aggregated_skills, class_features, estimated_hp, missing_required_fields, preview,
    proficiency_bonus, ClassFeature, ClassFeatures, DraftPreview, RequiredField,
};
pub use draft_rules::{check_class_entries, check_draft, DraftViolation};
pub use migration::{migrate, MigrationError};
pub use submission::{build_submission, submission_blockers, SubmissionBlocker};
