//! Ability score generation methods

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the six base ability values are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMethod {
    /// Fixed array assigned by player choice
    #[default]
    Standard,
    /// 4d6 drop lowest, six times
    Roll,
    /// Purchase from a shared point budget
    PointBuy,
}

impl ScoreMethod {
    /// True for the methods that assign six source values to abilities
    pub fn uses_slots(&self) -> bool {
        matches!(self, Self::Standard | Self::Roll)
    }

    /// Value accepted by the character backend's `ability_method` field
    pub fn backend_value(&self) -> &'static str {
        match self {
            Self::Standard => "standard_array",
            Self::PointBuy => "point_buy",
            Self::Roll => "manual",
        }
    }
}

impl fmt::Display for ScoreMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Standard => "standard",
            Self::Roll => "roll",
            Self::PointBuy => "pointbuy",
        };
        f.write_str(label)
    }
}

impl FromStr for ScoreMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "standard" | "standardarray" => Ok(Self::Standard),
            "roll" => Ok(Self::Roll),
            "pointbuy" => Ok(Self::PointBuy),
            _ => Err(format!("Unknown score method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_display() {
        for method in [ScoreMethod::Standard, ScoreMethod::Roll, ScoreMethod::PointBuy] {
            assert_eq!(method.to_string().parse::<ScoreMethod>(), Ok(method));
        }
        assert_eq!("point-buy".parse::<ScoreMethod>(), Ok(ScoreMethod::PointBuy));
        assert!("array".parse::<ScoreMethod>().is_err());
    }
}
