use rosu_map::section::general::GameMode;

use crate::PerformanceError;

pub trait RulesetExt: Sized {
    /// Parse an upstream ruleset id.
    fn from_ruleset_id(id: u32) -> Result<Self, PerformanceError>;

    /// The ruleset's id as used by upstream score records.
    fn ruleset_id(self) -> u32;

    /// The short name as used by the mod definition table.
    fn short_name(self) -> &'static str;

    /// Parse a short name such as `"fruits"` or a plain ruleset id.
    fn from_short_name(name: &str) -> Option<Self>;
}

impl RulesetExt for GameMode {
    fn from_ruleset_id(id: u32) -> Result<Self, PerformanceError> {
        match id {
            0 => Ok(Self::Osu),
            1 => Ok(Self::Taiko),
            2 => Ok(Self::Catch),
            3 => Ok(Self::Mania),
            _ => Err(PerformanceError::UnsupportedRuleset(id)),
        }
    }

    fn ruleset_id(self) -> u32 {
        match self {
            Self::Osu => 0,
            Self::Taiko => 1,
            Self::Catch => 2,
            Self::Mania => 3,
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            Self::Osu => "osu",
            Self::Taiko => "taiko",
            Self::Catch => "fruits",
            Self::Mania => "mania",
        }
    }

    fn from_short_name(name: &str) -> Option<Self> {
        match name {
            "osu" | "0" => Some(Self::Osu),
            "taiko" | "1" => Some(Self::Taiko),
            "fruits" | "catch" | "2" => Some(Self::Catch),
            "mania" | "3" => Some(Self::Mania),
            _ => None,
        }
    }
}
