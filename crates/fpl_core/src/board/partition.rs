//! Active / bench split of the squad.
//!
//! For each category the first `required[category]` slots (construction
//! order) are active and the remainder sit on the bench. The split is always
//! recomputed from the slots, never stored alongside them.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::slot::{Slot, SlotId};
use crate::models::{Formation, Player, PositionCategory, RequiredActiveCounts};

/// Read-only view emitted to observers after every board change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    pub formation: Formation,
    pub active: BTreeMap<PositionCategory, Vec<Slot>>,
    pub bench: Vec<Slot>,
}

/// Derive the active/bench partition for `formation`.
pub fn derive_partition(slots: &[Slot], formation: Formation) -> Partition {
    derive_with_counts(slots, formation, formation.required_active())
}

fn derive_with_counts(
    slots: &[Slot],
    formation: Formation,
    required: RequiredActiveCounts,
) -> Partition {
    let mut active = BTreeMap::new();
    let mut bench = Vec::new();

    for category in PositionCategory::ALL {
        // Counts above the category's slot total just make every slot active.
        let limit = required.for_category(category);
        let mut row = Vec::with_capacity(limit.min(category.squad_quota()));
        for (index, slot) in slots.iter().filter(|s| s.category() == category).enumerate() {
            if index < limit {
                row.push(slot.clone());
            } else {
                bench.push(slot.clone());
            }
        }
        active.insert(category, row);
    }

    Partition { formation, active, bench }
}

impl Partition {
    pub fn active_slots(&self, category: PositionCategory) -> &[Slot] {
        self.active.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_count(&self) -> usize {
        self.active.values().map(Vec::len).sum()
    }

    pub fn is_active(&self, slot_id: SlotId) -> bool {
        self.active.values().flatten().any(|s| s.id() == slot_id)
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.active.values().flatten().filter_map(Slot::occupant)
    }

    pub fn bench_players(&self) -> impl Iterator<Item = &Player> {
        self.bench.iter().filter_map(Slot::occupant)
    }
}

/// Plain-text board: one row per category, then the bench.
impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Formation {}", self.formation)?;
        for category in PositionCategory::ALL {
            write_row(f, category.label(), self.active_slots(category))?;
            writeln!(f)?;
        }
        write_row(f, "SUB", &self.bench)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, slots: &[Slot]) -> fmt::Result {
    write!(f, "{label:<3} |")?;
    for (index, slot) in slots.iter().enumerate() {
        let name = slot.occupant().map(Player::display_name).unwrap_or_else(|| "-".to_string());
        let separator = if index == 0 { " " } else { ", " };
        write!(f, "{separator}{} {name}", slot.id())?;
    }
    Ok(())
}
