//! Thread-safe handle around a [`SquadBoard`].
//!
//! Every operation holds the lock for its whole duration, so a duplicate
//! check and the seat that follows it can never interleave with another
//! caller's assignment.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Partition, ReconcileReport, SlotId, SquadBoard};
use crate::error::Result;
use crate::models::{Formation, Player};

#[derive(Debug, Clone, Default)]
pub struct SharedSquadBoard {
    inner: Arc<Mutex<SquadBoard>>,
}

impl SharedSquadBoard {
    pub fn new(board: SquadBoard) -> Self {
        Self { inner: Arc::new(Mutex::new(board)) }
    }

    fn lock(&self) -> MutexGuard<'_, SquadBoard> {
        // A panic in an observer leaves the slots consistent; keep serving.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_formation(&self, formation_id: &str) -> Formation {
        self.lock().set_formation(formation_id)
    }

    pub fn assign_player(&self, player: Player, slot_id: SlotId) -> Result<Option<Player>> {
        self.lock().assign_player(player, slot_id)
    }

    pub fn reconcile(&self, players: Vec<Player>) -> ReconcileReport {
        self.lock().reconcile(players)
    }

    pub fn partition(&self) -> Partition {
        self.lock().partition()
    }

    pub fn full_roster(&self) -> Vec<(SlotId, Option<Player>)> {
        self.lock()
            .full_roster()
            .into_iter()
            .map(|(id, player)| (id, player.cloned()))
            .collect()
    }

    /// Run `f` with exclusive access to the board.
    pub fn with_board<R>(&self, f: impl FnOnce(&mut SquadBoard) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterConfig;
    use crate::models::{PlayerId, PositionCategory};
    use std::thread;

    #[test]
    fn test_concurrent_assignments_keep_player_unique() {
        let shared = SharedSquadBoard::new(SquadBoard::with_config(RosterConfig::lenient()));

        let handles: Vec<_> = (1..=15u8)
            .map(|slot| {
                let board = shared.clone();
                thread::spawn(move || {
                    let saka = Player::new(303, "Saka", PositionCategory::Midfielder);
                    board.assign_player(saka, SlotId(slot)).is_ok()
                })
            })
            .collect();

        let successes = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();

        assert_eq!(successes, 1);
        let holders = shared
            .full_roster()
            .into_iter()
            .filter(|(_, p)| p.as_ref().is_some_and(|p| p.id == PlayerId(303)))
            .count();
        assert_eq!(holders, 1);
    }

    #[test]
    fn test_with_board_sees_shared_state() {
        let shared = SharedSquadBoard::default();
        shared.set_formation("541");
        let other = shared.clone();
        assert_eq!(other.with_board(|b| b.formation()), Formation::F541);
    }
}
