//! FPL Squad Tools
//!
//! File-backed collaborators for the squad board: player directory loading
//! (JSON/CSV), roster files and optimizer responses saved to disk.

pub mod directory;

use anyhow::{Context, Result};
use fpl_core::{OptimizeRequest, OptimizeResponse, Optimizer, OptimizerError, Player};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

pub use directory::{load_directory, load_directory_json, parse_players_csv, DirectoryIndex, ParseStats};

/// Accepted roster file layouts: a bare array of players, or an object
/// with a `players` array (the optimizer's team shape).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterFile {
    List(Vec<Player>),
    Team { players: Vec<Player> },
}

impl RosterFile {
    fn into_players(self) -> Vec<Player> {
        match self {
            RosterFile::List(players) | RosterFile::Team { players } => players,
        }
    }
}

pub fn load_roster(path: &Path) -> Result<Vec<Player>> {
    let json_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
    let roster: RosterFile = serde_json::from_str(&json_str)
        .with_context(|| format!("Failed to parse roster file: {}", path.display()))?;

    let players = roster.into_players();
    info!(players = players.len(), path = %path.display(), "roster loaded");
    Ok(players)
}

pub fn load_optimizer_response(path: &Path) -> Result<OptimizeResponse> {
    let json_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read optimizer response: {}", path.display()))?;
    serde_json::from_str(&json_str)
        .with_context(|| format!("Failed to parse optimizer response: {}", path.display()))
}

/// Answers every request with a response saved earlier.
#[derive(Debug, Clone)]
pub struct FileOptimizer {
    response: OptimizeResponse,
}

impl FileOptimizer {
    pub fn new(response: OptimizeResponse) -> Self {
        Self { response }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(load_optimizer_response(path)?))
    }
}

impl Optimizer for FileOptimizer {
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, OptimizerError> {
        if self.response.players.is_empty() {
            return Err(OptimizerError::Rejected("saved response has no players".to_string()));
        }
        info!(
            budget = request.budget,
            transfers = request.transfers,
            "answering optimizer request from file"
        );
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpl_core::{PlayerId, PositionCategory, SquadBoard};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_roster_accepts_both_layouts() {
        let list = temp_json(r#"[{"id": 1, "web_name": "Raya", "element_type": 1}]"#);
        let team = temp_json(
            r#"{"budget": 1.5, "totalPoints": 70, "players": [{"id": 2, "web_name": "Rice", "element_type": 3}]}"#,
        );

        let from_list = load_roster(list.path()).unwrap();
        let from_team = load_roster(team.path()).unwrap();

        assert_eq!(from_list[0].category, PositionCategory::Goalkeeper);
        assert_eq!(from_team[0].id, PlayerId(2));
    }

    #[test]
    fn test_load_roster_bad_json_has_context() {
        let file = temp_json("{not json");
        let err = load_roster(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse roster file"));
    }

    #[test]
    fn test_file_optimizer_feeds_board() {
        let response = temp_json(
            r#"{"players": [
                {"id": 1, "web_name": "Raya", "element_type": 1},
                {"id": 2, "web_name": "Saliba", "element_type": 2},
                {"id": 3, "web_name": "Hein", "element_type": 1},
                {"id": 4, "web_name": "Neto", "element_type": 1}
            ]}"#,
        );
        let optimizer = FileOptimizer::from_path(response.path()).unwrap();
        let request = OptimizeRequest { budget: 1000, transfers: 1, player_ids: vec![] };
        let mut board = SquadBoard::new();

        let report = board.apply_optimizer(&optimizer, &request).unwrap();

        assert_eq!(report.placed, 3);
        assert_eq!(report.dropped, vec![PlayerId(4)]);
    }

    #[test]
    fn test_file_optimizer_rejects_empty_response() {
        let optimizer = FileOptimizer::new(OptimizeResponse::new(vec![]));
        let request = OptimizeRequest { budget: 0, transfers: 1, player_ids: vec![] };
        assert!(matches!(optimizer.optimize(&request), Err(OptimizerError::Rejected(_))));
    }
}
