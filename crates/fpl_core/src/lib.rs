//! # fpl_core - Formation-Based Squad Slot Engine
//!
//! Keeps a 15-player fantasy football squad in fixed position slots and
//! derives the starting lineup and bench from the selected formation.
//!
//! ## Features
//! - Fixed 2 GK / 5 DEF / 5 MID / 3 FWD slot layout
//! - Eight formations with unknown identifiers falling back to 4-4-2
//! - Duplicate-safe direct assignment and bulk reconciliation
//! - Optimizer request building and a JSON command API

pub mod api;
pub mod board;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod submission;

#[cfg(test)]
mod test_fixtures;

pub use api::{apply_command_json, full_roster_json, ApiError, ApiResponse, RosterCommand};
pub use board::{
    derive_partition, Partition, PartitionObserver, ReconcileReport, SharedSquadBoard, Slot,
    SlotId, SquadBoard, SQUAD_SIZE,
};
pub use config::{ConfigError, RosterConfig};
pub use directory::{PlayerDirectory, SearchQuery, MIN_QUERY_CHARS};
pub use error::{Result, RosterError};
pub use models::{Formation, FormationCatalog, Player, PlayerId, PositionCategory};
pub use optimizer::{OptimizeRequest, OptimizeResponse, Optimizer, OptimizerError};
pub use submission::{Budget, RosterSubmission, SubmissionError, Transfers};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
