use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::category::{element_type, PositionCategory};

/// Directory-wide player identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        PlayerId(id)
    }
}

/// Player record as returned by the directory and the optimizer.
///
/// # Boundary Contract
/// - The squad board only inspects `id` (uniqueness) and `category`
///   (slot routing); everything else is carried through untouched.
/// - Fields the board does not know about are kept in `extra` so a record
///   returned by the optimizer round-trips without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub id: PlayerId,

    /// Short display name (`web_name` on the wire)
    #[serde(default)]
    pub web_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,

    #[serde(rename = "element_type", with = "element_type")]
    #[schemars(with = "u8")]
    pub category: PositionCategory,

    /// Price in tenths of a million
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_cost: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_code: Option<u32>,

    /// Predicted points for the next gameweek
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, web_name: impl Into<String>, category: PositionCategory) -> Self {
        Self {
            id: id.into(),
            web_name: web_name.into(),
            first_name: None,
            second_name: None,
            category,
            now_cost: None,
            team_code: None,
            prediction: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.second_name = Some(second.into());
        self
    }

    pub fn with_cost(mut self, tenths: u32) -> Self {
        self.now_cost = Some(tenths);
        self
    }

    /// Name shown on the board: `web_name`, falling back to the full name,
    /// then to the id.
    pub fn display_name(&self) -> String {
        if !self.web_name.is_empty() {
            return self.web_name.clone();
        }
        match (&self.first_name, &self.second_name) {
            (Some(first), Some(second)) => format!("{first} {second}"),
            (None, Some(name)) | (Some(name), None) => name.clone(),
            (None, None) => format!("#{}", self.id),
        }
    }

    /// Case-insensitive substring match against first, second and web name.
    /// `needle` must already be lowercase.
    pub fn name_contains(&self, needle: &str) -> bool {
        [Some(&self.web_name), self.first_name.as_ref(), self.second_name.as_ref()]
            .into_iter()
            .flatten()
            .any(|name| name.to_lowercase().contains(needle))
    }
}
