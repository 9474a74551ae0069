//! Ability keys, ability score blocks and racial bonus maps

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six core abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    /// All abilities in sheet order (str, dex, con, int, wis, cha)
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    /// Short lowercase key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Con => "con",
            Self::Int => "int",
            Self::Wis => "wis",
            Self::Cha => "cha",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    /// Position in sheet order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key().to_uppercase())
    }
}

/// Ability modifier: `floor((value - 10) / 2)`
pub fn modifier(value: i32) -> i32 {
    (value - 10).div_euclid(2)
}

/// Format a modifier with an explicit sign (`+2`, `-1`, `+0`)
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}

/// The six final ability scores of a character (racial bonus included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub fn from_array(values: [i32; 6]) -> Self {
        Self {
            str: values[0],
            dex: values[1],
            con: values[2],
            int: values[3],
            wis: values[4],
            cha: values[5],
        }
    }

    pub fn to_array(&self) -> [i32; 6] {
        [self.str, self.dex, self.con, self.int, self.wis, self.cha]
    }

    pub fn get(&self, ability: Ability) -> i32 {
        self.to_array()[ability.index()]
    }

    /// Return a copy with one ability replaced
    pub fn with(&self, ability: Ability, value: i32) -> Self {
        let mut values = self.to_array();
        values[ability.index()] = value;
        Self::from_array(values)
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        modifier(self.get(ability))
    }

    /// True when every score is a positive number
    pub fn all_positive(&self) -> bool {
        self.to_array().iter().all(|v| *v > 0)
    }
}

/// Partial ability -> bonus map granted by a race or subrace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityBonuses([i32; 6]);

impl AbilityBonuses {
    pub fn from_pairs(pairs: &[(Ability, i32)]) -> Self {
        let mut values = [0; 6];
        for (ability, bonus) in pairs {
            values[ability.index()] += bonus;
        }
        Self(values)
    }

    pub fn get(&self, ability: Ability) -> i32 {
        self.0[ability.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Abilities that receive a positive bonus, in sheet order
    pub fn positive(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL
            .into_iter()
            .map(move |a| (a, self.get(a)))
            .filter(|(_, b)| *b > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_rounds_down() {
        assert_eq!(modifier(8), -1);
        assert_eq!(modifier(9), -1);
        assert_eq!(modifier(10), 0);
        assert_eq!(modifier(13), 1);
        assert_eq!(modifier(15), 2);
        assert_eq!(modifier(20), 5);
        assert_eq!(modifier(1), -5);
    }

    #[test]
    fn test_format_modifier() {
        assert_eq!(format_modifier(2), "+2");
        assert_eq!(format_modifier(0), "+0");
        assert_eq!(format_modifier(-1), "-1");
    }

    #[test]
    fn test_scores_serialize_with_short_keys() {
        let scores = AbilityScores::from_array([15, 14, 13, 12, 10, 8]);
        let json = serde_json::to_value(scores).unwrap();
        assert_eq!(json["str"], 15);
        assert_eq!(json["cha"], 8);
    }

    #[test]
    fn test_with_replaces_single_ability() {
        let scores = AbilityScores::from_array([8; 6]).with(Ability::Con, 13);
        assert_eq!(scores.get(Ability::Con), 13);
        assert_eq!(scores.get(Ability::Str), 8);
        assert_eq!(scores.to_array(), [8, 8, 13, 8, 8, 8]);
    }

    #[test]
    fn test_ability_key_round_trip() {
        for ability in Ability::ALL {
            assert_eq!(Ability::from_key(ability.key()), Some(ability));
        }
        assert_eq!(Ability::from_key("luck"), None);
    }
}
