use thiserror::Error;

use crate::board::SlotId;
use crate::models::{PlayerId, PositionCategory};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("Player {player_id} is already assigned to slot {existing_slot}")]
    DuplicateAssignment { player_id: PlayerId, existing_slot: SlotId, requested_slot: SlotId },

    #[error("Player {player_id} ({player_category}) cannot fill {slot_category} slot {slot_id}")]
    CategoryMismatch {
        player_id: PlayerId,
        player_category: PositionCategory,
        slot_id: SlotId,
        slot_category: PositionCategory,
    },

    #[error("Unknown slot: {0}")]
    UnknownSlot(SlotId),

    #[error("Unknown formation: {0}")]
    UnknownFormation(String),

    #[error("Unknown position category: {0}")]
    UnknownCategory(String),

    #[error("Search query must be at least {min} characters, found {len}")]
    InvalidSearchQuery { len: usize, min: usize },
}

impl RosterError {
    /// Stable machine code used by the JSON API envelope.
    pub fn code(&self) -> &'static str {
        match self {
            RosterError::DuplicateAssignment { .. } => "DUPLICATE_ASSIGNMENT",
            RosterError::CategoryMismatch { .. } => "CATEGORY_MISMATCH",
            RosterError::UnknownSlot(_) => "UNKNOWN_SLOT",
            RosterError::UnknownFormation(_) => "UNKNOWN_FORMATION",
            RosterError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            RosterError::InvalidSearchQuery { .. } => "INVALID_SEARCH_QUERY",
        }
    }

    /// Whether the user can correct the condition and retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RosterError::DuplicateAssignment { .. } => true,
            RosterError::CategoryMismatch { .. } => true,
            RosterError::InvalidSearchQuery { .. } => true,
            RosterError::UnknownSlot(_) => false,
            RosterError::UnknownFormation(_) => false,
            RosterError::UnknownCategory(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_existing_slot() {
        let err = RosterError::DuplicateAssignment {
            player_id: PlayerId(7),
            existing_slot: SlotId(3),
            requested_slot: SlotId(9),
        };
        assert_eq!(err.to_string(), "Player 7 is already assigned to slot 3");
        assert_eq!(err.code(), "DUPLICATE_ASSIGNMENT");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_unknown_slot_not_recoverable() {
        assert!(!RosterError::UnknownSlot(SlotId(16)).is_recoverable());
    }
}
