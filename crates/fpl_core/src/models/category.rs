use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;

/// Playing-position category used by the squad rules.
///
/// The wire format from the player directory carries this as `element_type`
/// (1 = GK, 2 = DEF, 3 = MID, 4 = FWD). See [`element_type`] for the serde
/// adapter used on player records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum PositionCategory {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl PositionCategory {
    /// All categories in squad order (slot construction order).
    pub const ALL: [PositionCategory; 4] = [
        PositionCategory::Goalkeeper,
        PositionCategory::Defender,
        PositionCategory::Midfielder,
        PositionCategory::Forward,
    ];

    pub const fn element_type(self) -> u8 {
        match self {
            PositionCategory::Goalkeeper => 1,
            PositionCategory::Defender => 2,
            PositionCategory::Midfielder => 3,
            PositionCategory::Forward => 4,
        }
    }

    pub const fn from_element_type(code: u8) -> Option<Self> {
        match code {
            1 => Some(PositionCategory::Goalkeeper),
            2 => Some(PositionCategory::Defender),
            3 => Some(PositionCategory::Midfielder),
            4 => Some(PositionCategory::Forward),
            _ => None,
        }
    }

    /// Number of slots this category owns in a full 15-player squad.
    pub const fn squad_quota(self) -> usize {
        match self {
            PositionCategory::Goalkeeper => 2,
            PositionCategory::Defender => 5,
            PositionCategory::Midfielder => 5,
            PositionCategory::Forward => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PositionCategory::Goalkeeper => "GK",
            PositionCategory::Defender => "DEF",
            PositionCategory::Midfielder => "MID",
            PositionCategory::Forward => "FWD",
        }
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PositionCategory {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1" | "GK" | "GKP" | "GOALKEEPER" => Ok(PositionCategory::Goalkeeper),
            "2" | "DEF" | "DEFENDER" => Ok(PositionCategory::Defender),
            "3" | "MID" | "MIDFIELDER" => Ok(PositionCategory::Midfielder),
            // FWR is the label the web client used for forwards
            "4" | "FWD" | "FWR" | "FORWARD" => Ok(PositionCategory::Forward),
            _ => Err(RosterError::UnknownCategory(s.to_string())),
        }
    }
}

/// Serde adapter that encodes a [`PositionCategory`] as its numeric
/// `element_type` code.
pub mod element_type {
    use super::PositionCategory;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        category: &PositionCategory,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(category.element_type())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PositionCategory, D::Error> {
        let code = u8::deserialize(deserializer)?;
        PositionCategory::from_element_type(code)
            .ok_or_else(|| D::Error::custom(format!("unknown element_type {code}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squad_quota_totals_fifteen() {
        let total: usize = PositionCategory::ALL.iter().map(|c| c.squad_quota()).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn test_element_type_codes_match_directory() {
        assert_eq!(PositionCategory::Goalkeeper.element_type(), 1);
        assert_eq!(PositionCategory::Forward.element_type(), 4);
        assert_eq!(PositionCategory::from_element_type(3), Some(PositionCategory::Midfielder));
        assert_eq!(PositionCategory::from_element_type(0), None);
        assert_eq!(PositionCategory::from_element_type(5), None);
    }

    #[test]
    fn test_parse_accepts_labels_and_codes() {
        assert_eq!("gk".parse::<PositionCategory>().unwrap(), PositionCategory::Goalkeeper);
        assert_eq!("FWR".parse::<PositionCategory>().unwrap(), PositionCategory::Forward);
        assert_eq!(" 2 ".parse::<PositionCategory>().unwrap(), PositionCategory::Defender);
        assert!(matches!(
            "winger".parse::<PositionCategory>(),
            Err(RosterError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_labels_serialize_as_short_codes() {
        let json = serde_json::to_string(&PositionCategory::Midfielder).unwrap();
        assert_eq!(json, "\"MID\"");
    }
}
