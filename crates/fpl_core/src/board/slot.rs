use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Player, PlayerId, PositionCategory};

/// Total slots on a squad board
pub const SQUAD_SIZE: usize = 15;

/// Stable slot identifier, 1-based and contiguous per category
/// (GK 1-2, DEF 3-7, MID 8-12, FWD 13-15).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct SlotId(pub u8);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One roster position. `id` and `category` are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Slot {
    id: SlotId,
    category: PositionCategory,
    occupant: Option<Player>,
}

impl Slot {
    fn empty(id: SlotId, category: PositionCategory) -> Self {
        Self { id, category, occupant: None }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn category(&self) -> PositionCategory {
        self.category
    }

    pub fn occupant(&self) -> Option<&Player> {
        self.occupant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn holds(&self, player_id: PlayerId) -> bool {
        self.occupant.as_ref().is_some_and(|p| p.id == player_id)
    }

    /// Seat a player, returning whoever was displaced.
    pub(crate) fn seat(&mut self, player: Player) -> Option<Player> {
        self.occupant.replace(player)
    }

    pub(crate) fn clear(&mut self) -> Option<Player> {
        self.occupant.take()
    }
}

/// The 15 empty slots in construction order.
pub(crate) fn squad_template() -> Vec<Slot> {
    let mut slots = Vec::with_capacity(SQUAD_SIZE);
    let mut next_id = 1u8;
    for category in PositionCategory::ALL {
        for _ in 0..category.squad_quota() {
            slots.push(Slot::empty(SlotId(next_id), category));
            next_id += 1;
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_fixed_shape() {
        let slots = squad_template();
        assert_eq!(slots.len(), SQUAD_SIZE);
        for category in PositionCategory::ALL {
            let count = slots.iter().filter(|s| s.category() == category).count();
            assert_eq!(count, category.squad_quota(), "{category}");
        }
        assert!(slots.iter().all(Slot::is_empty));
    }

    #[test]
    fn test_template_ids_are_contiguous_per_category() {
        let slots = squad_template();
        let ids: Vec<u8> = slots.iter().map(|s| s.id().0).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<u8>>());

        assert_eq!(slots[0].category(), PositionCategory::Goalkeeper);
        assert_eq!(slots[1].category(), PositionCategory::Goalkeeper);
        assert_eq!(slots[2].category(), PositionCategory::Defender);
        assert_eq!(slots[6].category(), PositionCategory::Defender);
        assert_eq!(slots[7].category(), PositionCategory::Midfielder);
        assert_eq!(slots[12].category(), PositionCategory::Forward);
    }

    #[test]
    fn test_seat_returns_displaced_player() {
        let mut slot = Slot::empty(SlotId(3), PositionCategory::Defender);
        assert!(slot.seat(Player::new(1, "White", PositionCategory::Defender)).is_none());

        let displaced = slot.seat(Player::new(2, "Timber", PositionCategory::Defender));
        assert_eq!(displaced.map(|p| p.id), Some(PlayerId(1)));
        assert!(slot.holds(PlayerId(2)));
    }
}
