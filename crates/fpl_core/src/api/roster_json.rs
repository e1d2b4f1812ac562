//! JSON API for squad board commands
//!
//! Commands arrive as JSON objects tagged by `command`:
//!
//! ```json
//! {"command": "set_formation", "formation": "352"}
//! {"command": "assign_player", "slot_id": 3, "player": {"id": 7, "element_type": 2}}
//! {"command": "reconcile", "players": [ ... ]}
//! ```
//!
//! Each command is applied to the board run-to-completion and answered with
//! an [`ApiResponse`] carrying the new partition.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{error, info, warn};

use super::{ApiError, ApiResponse};
use crate::board::{Partition, ReconcileReport, SlotId, SquadBoard};
use crate::error::Result;
use crate::models::{Formation, Player, PositionCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RosterCommand {
    SetFormation { formation: String },
    AssignPlayer { player: Player, slot_id: SlotId },
    Reconcile { players: Vec<Player> },
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub formation: Formation,
    pub filled: usize,
    pub partition: Partition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displaced: Option<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconcile: Option<ReconcileReport>,
}

/// One row of [`full_roster_json`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub slot_id: SlotId,
    pub category: PositionCategory,
    pub player: Option<Player>,
}

/// Apply a single command to the board.
pub fn apply_command(board: &mut SquadBoard, command: RosterCommand) -> Result<CommandOutcome> {
    let mut displaced = None;
    let mut reconcile = None;

    match command {
        RosterCommand::SetFormation { formation } => {
            board.set_formation(&formation);
        }
        RosterCommand::AssignPlayer { player, slot_id } => {
            displaced = board.assign_player(player, slot_id)?;
        }
        RosterCommand::Reconcile { players } => {
            reconcile = Some(board.reconcile(players));
        }
    }

    Ok(CommandOutcome {
        formation: board.formation(),
        filled: board.filled_count(),
        partition: board.partition(),
        displaced,
        reconcile,
    })
}

/// Apply a command from JSON
///
/// # Returns
/// JSON string containing `ApiResponse<CommandOutcome>`
pub fn apply_command_json(request_json: &str, board: &mut SquadBoard) -> String {
    let command: RosterCommand = match serde_json::from_str(request_json) {
        Ok(command) => command,
        Err(e) => {
            error!("Failed to parse RosterCommand: {}", e);
            let error = ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e));
            return ApiResponse::<CommandOutcome>::error(error).to_json();
        }
    };

    respond(board, command).to_json()
}

/// Apply a JSON array of commands in order. A rejected command does not stop
/// the ones after it.
///
/// # Returns
/// JSON string containing `ApiResponse<Vec<ApiResponse<CommandOutcome>>>`
pub fn apply_commands_json(request_json: &str, board: &mut SquadBoard) -> String {
    let commands: Vec<RosterCommand> = match serde_json::from_str(request_json) {
        Ok(commands) => commands,
        Err(e) => {
            error!("Failed to parse RosterCommand batch: {}", e);
            let error = ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e));
            return ApiResponse::<Vec<ApiResponse<CommandOutcome>>>::error(error).to_json();
        }
    };

    let mut queue = CommandQueue::default();
    commands.into_iter().for_each(|c| queue.push(c));
    let results: Vec<_> = queue
        .drain_into(board)
        .into_iter()
        .map(|result| match result {
            Ok(outcome) => ApiResponse::success(outcome),
            Err(e) => ApiResponse::error(ApiError::from(&e)),
        })
        .collect();

    ApiResponse::success(results).to_json()
}

/// Current roster as JSON, ascending slot id, empties included.
pub fn full_roster_json(board: &SquadBoard) -> String {
    let entries: Vec<RosterEntry> = board
        .slots()
        .iter()
        .map(|slot| RosterEntry {
            slot_id: slot.id(),
            category: slot.category(),
            player: slot.occupant().cloned(),
        })
        .collect();
    ApiResponse::success(entries).to_json()
}

fn respond(board: &mut SquadBoard, command: RosterCommand) -> ApiResponse<CommandOutcome> {
    match apply_command(board, command) {
        Ok(outcome) => {
            info!(filled = outcome.filled, "command applied");
            ApiResponse::success(outcome)
        }
        Err(e) => {
            warn!("Roster command rejected: {}", e);
            ApiResponse::error(ApiError::from(&e))
        }
    }
}

/// FIFO of pending commands, applied one at a time.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<RosterCommand>,
}

impl CommandQueue {
    pub fn push(&mut self, command: RosterCommand) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain_into(&mut self, board: &mut SquadBoard) -> Vec<Result<CommandOutcome>> {
        self.pending.drain(..).map(|command| apply_command(board, command)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::full_squad;
    use serde_json::{json, Value};

    fn parse(response: &str) -> Value {
        serde_json::from_str(response).unwrap()
    }

    #[test]
    fn test_set_formation_command() {
        let mut board = SquadBoard::new();
        let response = parse(&apply_command_json(
            r#"{"command": "set_formation", "formation": "3-5-2"}"#,
            &mut board,
        ));

        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["formation"], "3-5-2");
        assert_eq!(response["data"]["partition"]["active"]["MID"].as_array().unwrap().len(), 5);
        assert_eq!(board.formation(), Formation::F352);
    }

    #[test]
    fn test_assign_duplicate_returns_error_envelope() {
        let mut board = SquadBoard::new();
        let assign = |slot: u8| {
            json!({
                "command": "assign_player",
                "slot_id": slot,
                "player": {"id": 7, "web_name": "Saliba", "element_type": 2}
            })
            .to_string()
        };

        let first = parse(&apply_command_json(&assign(3), &mut board));
        assert_eq!(first["success"], true);

        let second = parse(&apply_command_json(&assign(4), &mut board));
        assert_eq!(second["success"], false);
        assert_eq!(second["error"]["code"], "DUPLICATE_ASSIGNMENT");
        assert_eq!(second["error"]["details"]["existing_slot"], 3);
        assert!(board.slot(SlotId(4)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let mut board = SquadBoard::new();
        let response = parse(&apply_command_json(r#"{"command": "shuffle"}"#, &mut board));
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "INVALID_JSON");
    }

    #[test]
    fn test_batch_continues_after_rejection() {
        let mut board = SquadBoard::new();
        let batch = json!([
            {"command": "reconcile", "players": serde_json::to_value(full_squad()).unwrap()},
            {"command": "assign_player", "slot_id": 5, "player": {"id": 201, "element_type": 2}},
            {"command": "set_formation", "formation": "433"}
        ]);

        let response = parse(&apply_commands_json(&batch.to_string(), &mut board));

        let results = response["data"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["data"]["reconcile"]["placed"], 15);
        assert_eq!(results[1]["error"]["code"], "DUPLICATE_ASSIGNMENT");
        assert_eq!(results[2]["data"]["filled"], 0);
    }

    #[test]
    fn test_full_roster_json_lists_all_slots() {
        let mut board = SquadBoard::new();
        board.reconcile(full_squad().into_iter().take(1));

        let response = parse(&full_roster_json(&board));
        let entries = response["data"].as_array().unwrap();

        assert_eq!(entries.len(), 15);
        assert_eq!(entries[0]["slot_id"], 1);
        assert_eq!(entries[0]["category"], "GK");
        assert_eq!(entries[0]["player"]["web_name"], "Raya");
        assert!(entries[14]["player"].is_null());
    }

    #[test]
    fn test_queue_applies_in_order() {
        let mut board = SquadBoard::new();
        let mut queue = CommandQueue::default();
        queue.push(RosterCommand::Reconcile { players: full_squad() });
        queue.push(RosterCommand::SetFormation { formation: "541".to_string() });
        assert_eq!(queue.len(), 2);

        let results = queue.drain_into(&mut board);

        assert!(queue.is_empty());
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(board.formation(), Formation::F541);
        assert_eq!(board.filled_count(), 0);
    }
}
