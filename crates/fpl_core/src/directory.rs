//! Player directory seam.
//!
//! The board never searches; it only receives players chosen from a
//! directory. Queries are validated here so every backend sees the same
//! rules.

use crate::error::{Result, RosterError};
use crate::models::{Player, PositionCategory};

/// Shortest query text a directory will accept
pub const MIN_QUERY_CHARS: usize = 2;

/// A validated `{category, query_text}` directory request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    category: PositionCategory,
    text: String,
    needle: String,
}

impl SearchQuery {
    /// # Errors
    /// [`RosterError::InvalidSearchQuery`] when the trimmed text has fewer
    /// than [`MIN_QUERY_CHARS`] characters.
    pub fn new(category: PositionCategory, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let trimmed = text.trim();
        let len = trimmed.chars().count();
        if len < MIN_QUERY_CHARS {
            return Err(RosterError::InvalidSearchQuery { len, min: MIN_QUERY_CHARS });
        }
        let needle = trimmed.to_lowercase();
        Ok(Self { category, text, needle })
    }

    pub fn category(&self) -> PositionCategory {
        self.category
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn matches(&self, player: &Player) -> bool {
        player.category == self.category && player.name_contains(&self.needle)
    }
}

pub trait PlayerDirectory {
    /// Players of the query's category whose names contain the query text.
    fn search(&self, query: &SearchQuery) -> Vec<Player>;
}

impl PlayerDirectory for [Player] {
    fn search(&self, query: &SearchQuery) -> Vec<Player> {
        self.iter().filter(|p| query.matches(p)).cloned().collect()
    }
}

impl PlayerDirectory for Vec<Player> {
    fn search(&self, query: &SearchQuery) -> Vec<Player> {
        self.as_slice().search(query)
    }
}
