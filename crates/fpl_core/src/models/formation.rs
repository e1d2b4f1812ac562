use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::category::PositionCategory;
use crate::error::RosterError;

/// Lineup shapes the squad board supports.
///
/// Accepts both the dashed code (`"4-4-2"`) and the compact code the web
/// client sends (`"442"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum Formation {
    #[serde(rename = "3-4-3", alias = "343")]
    F343,
    #[serde(rename = "3-5-2", alias = "352")]
    F352,
    #[serde(rename = "4-3-3", alias = "433")]
    F433,
    #[default]
    #[serde(rename = "4-4-2", alias = "442")]
    F442,
    #[serde(rename = "4-5-1", alias = "451")]
    F451,
    #[serde(rename = "5-2-3", alias = "523")]
    F523,
    #[serde(rename = "5-3-2", alias = "532")]
    F532,
    #[serde(rename = "5-4-1", alias = "541")]
    F541,
}

impl Formation {
    pub const ALL: [Formation; 8] = [
        Formation::F343,
        Formation::F352,
        Formation::F433,
        Formation::F442,
        Formation::F451,
        Formation::F523,
        Formation::F532,
        Formation::F541,
    ];

    /// Returns (defenders, midfielders, forwards)
    pub fn line_counts(&self) -> (u8, u8, u8) {
        match self {
            Formation::F343 => (3, 4, 3),
            Formation::F352 => (3, 5, 2),
            Formation::F433 => (4, 3, 3),
            Formation::F442 => (4, 4, 2),
            Formation::F451 => (4, 5, 1),
            Formation::F523 => (5, 2, 3),
            Formation::F532 => (5, 3, 2),
            Formation::F541 => (5, 4, 1),
        }
    }

    /// Canonical formation code string (e.g., "4-3-3").
    pub fn code(&self) -> &'static str {
        match self {
            Formation::F343 => "3-4-3",
            Formation::F352 => "3-5-2",
            Formation::F433 => "4-3-3",
            Formation::F442 => "4-4-2",
            Formation::F451 => "4-5-1",
            Formation::F523 => "5-2-3",
            Formation::F532 => "5-3-2",
            Formation::F541 => "5-4-1",
        }
    }

    /// Compact code without separators (e.g., "433").
    pub fn compact_code(&self) -> &'static str {
        match self {
            Formation::F343 => "343",
            Formation::F352 => "352",
            Formation::F433 => "433",
            Formation::F442 => "442",
            Formation::F451 => "451",
            Formation::F523 => "523",
            Formation::F532 => "532",
            Formation::F541 => "541",
        }
    }

    pub fn required_active(&self) -> RequiredActiveCounts {
        let (defenders, midfielders, forwards) = self.line_counts();
        RequiredActiveCounts { goalkeepers: 1, defenders, midfielders, forwards }
    }

    /// Strict parse; `None` for anything outside the catalog.
    pub fn parse(id: &str) -> Option<Self> {
        let compact: String = id.chars().filter(|c| c.is_ascii_digit()).collect();
        if compact.len() != id.chars().filter(|c| !matches!(c, '-' | ' ')).count() {
            return None;
        }
        Self::ALL.into_iter().find(|f| f.compact_code() == compact)
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Formation {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RosterError::UnknownFormation(s.to_string()))
    }
}

/// How many slots of each category count toward the starting eleven.
///
/// Goalkeepers are always 1 and the outfield lines sum to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RequiredActiveCounts {
    pub goalkeepers: u8,
    pub defenders: u8,
    pub midfielders: u8,
    pub forwards: u8,
}

impl RequiredActiveCounts {
    pub fn for_category(&self, category: PositionCategory) -> usize {
        let count = match category {
            PositionCategory::Goalkeeper => self.goalkeepers,
            PositionCategory::Defender => self.defenders,
            PositionCategory::Midfielder => self.midfielders,
            PositionCategory::Forward => self.forwards,
        };
        count as usize
    }

    pub fn total(&self) -> usize {
        PositionCategory::ALL.iter().map(|c| self.for_category(*c)).sum()
    }
}

/// Static lookup from formation identifier to required active counts.
pub struct FormationCatalog;

impl FormationCatalog {
    pub const DEFAULT: Formation = Formation::F442;

    /// Resolve an identifier, falling back to [`Self::DEFAULT`] when it is not
    /// in the catalog.
    pub fn resolve(formation_id: &str) -> Formation {
        Formation::parse(formation_id).unwrap_or_else(|| {
            warn!(
                formation_id,
                fallback = Self::DEFAULT.code(),
                "unknown formation, using default"
            );
            Self::DEFAULT
        })
    }

    pub fn lookup(formation_id: &str) -> RequiredActiveCounts {
        Self::resolve(formation_id).required_active()
    }

    pub fn entries() -> impl Iterator<Item = (Formation, RequiredActiveCounts)> {
        Formation::ALL.into_iter().map(|f| (f, f.required_active()))
    }
}
