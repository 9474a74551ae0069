//! Game-data catalog records (races, classes, backgrounds)
//!
//! Shapes follow the backend's game-data serializers. List endpoints return a
//! subset of fields, so everything beyond `slug` and `name` defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Race {
    pub slug: String,
    pub name: String,
    pub name_en: String,
    pub description: String,
    pub speed: u32,
    pub size: String,
    /// Bonus hints as published by the backend, e.g. `{"dex": 2}`
    pub ability_bonuses: BTreeMap<String, i32>,
    pub has_subraces: bool,
    pub subraces: Vec<Subrace>,
}

impl Race {
    /// True when a subrace must be picked before the draft can be submitted
    pub fn requires_subrace(&self) -> bool {
        self.has_subraces && !self.subraces.is_empty()
    }

    pub fn subrace(&self, slug: &str) -> Option<&Subrace> {
        self.subraces.iter().find(|s| s.slug == slug)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subrace {
    pub slug: String,
    pub name: String,
    pub name_en: String,
    pub description: String,
    pub ability_bonuses: BTreeMap<String, i32>,
}

/// A single feature unlocked at some class level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharClass {
    pub slug: String,
    pub name: String,
    pub name_en: String,
    pub description: String,
    pub hit_die: u8,
    pub primary_ability: String,
    pub is_spellcaster: bool,
    pub spellcasting_ability: String,
    pub saving_throw_proficiencies: Vec<String>,
    pub skill_choices_count: u8,
    pub skill_choices: Vec<String>,
    /// Features keyed by level as a decimal string (`"1"`, `"2"`, ...)
    pub level_features: BTreeMap<String, Vec<FeatureEntry>>,
    pub roles: Vec<String>,
}

impl Default for CharClass {
    fn default() -> Self {
        Self {
            slug: String::new(),
            name: String::new(),
            name_en: String::new(),
            description: String::new(),
            hit_die: 8,
            primary_ability: String::new(),
            is_spellcaster: false,
            spellcasting_ability: String::new(),
            saving_throw_proficiencies: Vec::new(),
            skill_choices_count: 2,
            skill_choices: Vec::new(),
            level_features: BTreeMap::new(),
            roles: Vec::new(),
        }
    }
}

impl CharClass {
    /// Features unlocked at exactly `level`
    pub fn features_at(&self, level: u8) -> &[FeatureEntry] {
        self.level_features
            .get(&level.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub slug: String,
    pub name: String,
    pub name_en: String,
    pub description: String,
    pub skill_proficiencies: Vec<String>,
    pub tool_proficiencies: Vec<String>,
    pub feature_name: String,
    pub feature_description: String,
    pub starting_equipment: Vec<String>,
    pub starting_gold: u32,
}

/// Django REST Framework page wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_deserializes_from_list_shape() {
        let json = serde_json::json!({
            "id": "7f1c",
            "slug": "wizard",
            "name": "Wizard",
            "hit_die": 6,
            "primary_ability": "int",
            "is_spellcaster": true,
            "roles": ["caster"]
        });
        let class: CharClass = serde_json::from_value(json).unwrap();
        assert_eq!(class.hit_die, 6);
        assert!(class.level_features.is_empty());
        assert_eq!(class.skill_choices_count, 2);
    }

    #[test]
    fn test_features_at_level() {
        let json = serde_json::json!({
            "slug": "fighter",
            "name": "Fighter",
            "hit_die": 10,
            "level_features": {
                "1": [{"name": "Fighting Style", "description": "Adopt a style"},
                      {"name": "Second Wind", "description": "Regain hit points"}],
                "2": [{"name": "Action Surge", "description": "One more action"}]
            }
        });
        let class: CharClass = serde_json::from_value(json).unwrap();
        assert_eq!(class.features_at(1).len(), 2);
        assert_eq!(class.features_at(2)[0].name, "Action Surge");
        assert!(class.features_at(3).is_empty());
    }

    #[test]
    fn test_race_requires_subrace() {
        let race = Race {
            slug: "elf".to_string(),
            name: "Elf".to_string(),
            has_subraces: true,
            subraces: vec![Subrace {
                slug: "high-elf".to_string(),
                name: "High Elf".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(race.requires_subrace());
        assert!(race.subrace("high-elf").is_some());
        assert!(!Race::default().requires_subrace());
    }
}
