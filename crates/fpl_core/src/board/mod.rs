//! Squad Board - formation-based slot assignment
//!
//! Owns the 15 roster slots for one session. All changes go through
//! [`SquadBoard::set_formation`], [`SquadBoard::assign_player`] and
//! [`SquadBoard::reconcile`]; each successful call notifies every subscribed
//! [`PartitionObserver`] exactly once.

pub mod observer;
pub mod partition;
pub mod shared;
pub mod slot;

pub use observer::PartitionObserver;
pub use partition::{derive_partition, Partition};
pub use shared::SharedSquadBoard;
pub use slot::{Slot, SlotId, SQUAD_SIZE};

use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::models::{Formation, FormationCatalog, Player, PlayerId, PositionCategory};
use crate::optimizer::{OptimizeRequest, Optimizer, OptimizerError};

/// Outcome of a bulk reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Players seated into slots
    pub placed: usize,
    /// Players that did not fit their category, in input order per category
    pub dropped: Vec<PlayerId>,
}

pub struct SquadBoard {
    slots: Vec<Slot>,
    formation: Formation,
    config: RosterConfig,
    observers: Vec<Box<dyn PartitionObserver>>,
}

impl fmt::Debug for SquadBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SquadBoard")
            .field("formation", &self.formation)
            .field("slots", &self.slots)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for SquadBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SquadBoard {
    pub fn new() -> Self {
        Self::with_config(RosterConfig::default())
    }

    pub fn with_config(config: RosterConfig) -> Self {
        Self {
            slots: slot::squad_template(),
            formation: config.default_formation,
            config,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl PartitionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn formation(&self) -> Formation {
        self.formation
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, slot_id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id() == slot_id)
    }

    pub fn partition(&self) -> Partition {
        derive_partition(&self.slots, self.formation)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == SQUAD_SIZE
    }

    /// Slot currently holding `player_id`, if any.
    pub fn find_player(&self, player_id: PlayerId) -> Option<SlotId> {
        self.slots.iter().find(|s| s.holds(player_id)).map(Slot::id)
    }

    /// Ordered `(slot, occupant)` pairs, ascending slot id, empties included.
    pub fn full_roster(&self) -> Vec<(SlotId, Option<&Player>)> {
        self.slots.iter().map(|s| (s.id(), s.occupant())).collect()
    }

    /// Switch formation by identifier and clear every slot.
    ///
    /// Unknown identifiers resolve to the catalog default instead of failing.
    pub fn set_formation(&mut self, formation_id: &str) -> Formation {
        let formation = FormationCatalog::resolve(formation_id);
        self.set_formation_to(formation);
        formation
    }

    pub fn set_formation_to(&mut self, formation: Formation) {
        self.formation = formation;
        for slot in &mut self.slots {
            slot.clear();
        }
        info!(formation = formation.code(), "formation changed, squad cleared");
        self.emit();
    }

    /// Seat `player` in `slot_id`, replacing any previous occupant of that
    /// slot. Returns the displaced player.
    ///
    /// # Errors
    /// - [`RosterError::UnknownSlot`] if `slot_id` is not on the board
    /// - [`RosterError::DuplicateAssignment`] if the player already sits in
    ///   another slot
    /// - [`RosterError::CategoryMismatch`] if category enforcement is on and
    ///   the player's category differs from the slot's
    ///
    /// On error the board is unchanged and no notification is sent.
    pub fn assign_player(&mut self, player: Player, slot_id: SlotId) -> Result<Option<Player>> {
        let index = self
            .slots
            .iter()
            .position(|s| s.id() == slot_id)
            .ok_or(RosterError::UnknownSlot(slot_id))?;

        if let Some(existing) = self.slots.iter().find(|s| s.id() != slot_id && s.holds(player.id)) {
            warn!(
                player_id = player.id.0,
                existing_slot = existing.id().0,
                requested_slot = slot_id.0,
                "player already assigned"
            );
            return Err(RosterError::DuplicateAssignment {
                player_id: player.id,
                existing_slot: existing.id(),
                requested_slot: slot_id,
            });
        }

        let slot_category = self.slots[index].category();
        if self.config.enforce_slot_category && player.category != slot_category {
            return Err(RosterError::CategoryMismatch {
                player_id: player.id,
                player_category: player.category,
                slot_id,
                slot_category,
            });
        }

        debug!(player_id = player.id.0, slot = slot_id.0, "player assigned");
        let displaced = self.slots[index].seat(player);
        self.emit();
        Ok(displaced)
    }

    /// Replace every occupant from an unordered roster.
    ///
    /// Players are routed to slots of their own category in input order;
    /// slots are filled in ascending id order. Players beyond a category's
    /// slot count are dropped and listed in the report. Input is trusted to
    /// be free of duplicates.
    pub fn reconcile<I>(&mut self, players: I) -> ReconcileReport
    where
        I: IntoIterator<Item = Player>,
    {
        let mut queues: BTreeMap<PositionCategory, VecDeque<Player>> = BTreeMap::new();
        for player in players {
            queues.entry(player.category).or_default().push_back(player);
        }

        let mut placed = 0;
        for slot in &mut self.slots {
            slot.clear();
            if let Some(player) = queues.get_mut(&slot.category()).and_then(VecDeque::pop_front) {
                slot.seat(player);
                placed += 1;
            }
        }

        let dropped: Vec<PlayerId> = queues.into_values().flatten().map(|p| p.id).collect();
        if !dropped.is_empty() && self.config.warn_on_overflow {
            warn!(dropped = ?dropped, "reconcile dropped players beyond category capacity");
        }
        info!(placed, dropped = dropped.len(), "roster reconciled");

        self.emit();
        ReconcileReport { placed, dropped }
    }

    /// Send `request` to the optimizer and reconcile its answer.
    ///
    /// The board is left untouched when the optimizer fails.
    pub fn apply_optimizer<O>(
        &mut self,
        optimizer: &O,
        request: &OptimizeRequest,
    ) -> std::result::Result<ReconcileReport, OptimizerError>
    where
        O: Optimizer + ?Sized,
    {
        let response = optimizer.optimize(request)?;
        Ok(self.reconcile(response.players))
    }

    fn emit(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let partition = derive_partition(&self.slots, self.formation);
        for observer in &mut self.observers {
            observer.partition_changed(&partition);
        }
    }
}
