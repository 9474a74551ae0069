//! Forward migration of persisted wizard drafts
//!
//! Version 1 drafts were single-class and kept race fields flat on the
//! record. Version 2 nests the race choice, holds a `class_entries` list and
//! tracks ability slots explicitly.
//!
//! A draft that deserializes but breaks the class or score rules is rejected
//! like any other malformed record.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::entities::{WizardDraft, DRAFT_VERSION};
use crate::domain::services::ability_engine::infer_slots;
use crate::domain::services::draft_rules::{check_draft, DraftViolation};
use crate::domain::value_objects::MIN_CLASS_LEVEL;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Stored draft is not a JSON object")]
    NotAnObject,
    #[error("Stored draft has unsupported version {0}")]
    UnsupportedVersion(u64),
    #[error("Stored draft is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Stored draft is invalid: {0}")]
    Invalid(#[from] DraftViolation),
}

/// Upgrade a stored draft to the current version.
///
/// Fields missing from the stored record take their defaults. Applying this
/// to a current draft returns it unchanged.
pub fn migrate(stored: Value) -> Result<WizardDraft, MigrationError> {
    let Value::Object(fields) = stored else {
        return Err(MigrationError::NotAnObject);
    };

    let version = fields.get("_version").and_then(Value::as_u64).unwrap_or(1);
    let fields = match version {
        1 => upgrade_v1(fields),
        v if v == u64::from(DRAFT_VERSION) => fields,
        v => return Err(MigrationError::UnsupportedVersion(v)),
    };
    let has_slots = fields.contains_key("ability_slots");

    let Value::Object(mut merged) = serde_json::to_value(WizardDraft::default())? else {
        return Err(MigrationError::NotAnObject);
    };
    merged.extend(fields);
    merged.insert("_version".to_string(), Value::from(DRAFT_VERSION));

    let mut draft: WizardDraft = serde_json::from_value(Value::Object(merged))?;
    if !has_slots {
        draft.ability_slots = infer_slots(&draft);
    }
    check_draft(&draft)?;
    Ok(draft)
}

fn upgrade_v1(mut fields: Map<String, Value>) -> Map<String, Value> {
    let race_slug = take_string(&mut fields, "race_slug");
    let custom_name = take_string(&mut fields, "race_custom_name");
    let subrace_slug = take_string(&mut fields, "subrace_slug");
    if !fields.contains_key("race") {
        fields.insert(
            "race".to_string(),
            serde_json::json!({
                "slug": race_slug,
                "custom_name": custom_name,
                "subrace_slug": subrace_slug,
            }),
        );
    }

    let class_slug = take_string(&mut fields, "class_slug");
    let level = fields
        .remove("level")
        .and_then(|v| v.as_u64())
        .filter(|l| *l >= u64::from(MIN_CLASS_LEVEL))
        .unwrap_or(u64::from(MIN_CLASS_LEVEL));
    if !fields.contains_key("class_entries") {
        fields.insert(
            "class_entries".to_string(),
            serde_json::json!([{ "class_slug": class_slug, "level": level }]),
        );
    }

    // Superseded by explicit slots
    fields.remove("ability_assignment");
    fields
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}
