//! In-memory player directory
//!
//! JSON (array of player records) or CSV → FxHashMap<u32, Player>
//!
//! CSV columns, in order:
//! `id, web_name, first_name, second_name, element_type, now_cost, team_code`

use anyhow::{Context, Result};
use fpl_core::{Player, PlayerDirectory, PlayerId, PositionCategory, SearchQuery};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Player lookup keyed by id
#[derive(Debug, Clone, Default)]
pub struct DirectoryIndex {
    players: FxHashMap<u32, Player>,
    /// Where the index was loaded from, for log lines
    pub source: String,
}

impl DirectoryIndex {
    pub fn new(source: impl Into<String>) -> Self {
        Self { players: FxHashMap::default(), source: source.into() }
    }

    pub fn from_players(source: impl Into<String>, players: impl IntoIterator<Item = Player>) -> Self {
        let mut index = Self::new(source);
        for player in players {
            index.insert(player);
        }
        index
    }

    /// Insert, replacing any earlier record with the same id.
    pub fn insert(&mut self, player: Player) -> Option<Player> {
        let replaced = self.players.insert(player.id.0, player);
        if let Some(old) = &replaced {
            debug!(player_id = old.id.0, source = %self.source, "directory record replaced");
        }
        replaced
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id.0)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players ranked by predicted next-gameweek points, highest first.
    ///
    /// Missing and NaN predictions sort last; ties break on ascending id.
    /// `category` restricts the ranking to one position.
    pub fn top_predictions(&self, category: Option<PositionCategory>, limit: usize) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self
            .players
            .values()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect();
        ranked.sort_by(|a, b| compare_predictions(a, b).then(a.id.cmp(&b.id)));
        ranked.truncate(limit);
        ranked
    }
}

fn compare_predictions(a: &Player, b: &Player) -> Ordering {
    let known = |p: &Player| p.prediction.filter(|v| !v.is_nan());
    match (known(a), known(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl PlayerDirectory for DirectoryIndex {
    /// Results are sorted by player id.
    fn search(&self, query: &SearchQuery) -> Vec<Player> {
        let mut hits: Vec<Player> =
            self.players.values().filter(|p| query.matches(p)).cloned().collect();
        hits.sort_by_key(|p| p.id);
        hits
    }
}

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    pub skipped_header: bool,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: u32,
    web_name: String,
    first_name: Option<String>,
    second_name: Option<String>,
    element_type: u8,
    now_cost: Option<u32>,
    team_code: Option<u32>,
}

/// Load a directory from a JSON array of player records.
pub fn load_directory_json(path: &Path) -> Result<DirectoryIndex> {
    let json_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read player directory: {}", path.display()))?;
    let players: Vec<Player> = serde_json::from_str(&json_str)
        .with_context(|| format!("Failed to parse player directory: {}", path.display()))?;

    let index = DirectoryIndex::from_players(path.display().to_string(), players);
    info!(players = index.len(), source = %index.source, "player directory loaded");
    Ok(index)
}

/// Parse a players CSV into a [`DirectoryIndex`].
///
/// Rows that fail to parse or carry an unknown `element_type` are counted in
/// [`ParseStats::failed`] and skipped.
///
/// # Errors
/// File I/O errors, or a file with no valid rows.
pub fn parse_players_csv(csv_path: &Path, has_headers: bool) -> Result<(DirectoryIndex, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut index = DirectoryIndex::new(csv_path.display().to_string());
    let mut stats = ParseStats { skipped_header: has_headers, ..ParseStats::default() };

    for result in reader.deserialize::<CsvRow>() {
        stats.total_rows += 1;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                stats.failed += 1;
                warn!(line = stats.total_rows, "CSV parse error: {}", e);
                continue;
            }
        };

        let Some(category) = PositionCategory::from_element_type(row.element_type) else {
            stats.failed += 1;
            warn!(line = stats.total_rows, element_type = row.element_type, "unknown element_type");
            continue;
        };

        let mut player = Player::new(row.id, row.web_name, category);
        player.first_name = row.first_name;
        player.second_name = row.second_name;
        player.now_cost = row.now_cost;
        player.team_code = row.team_code;

        index.insert(player);
        stats.parsed += 1;
    }

    if stats.parsed == 0 {
        anyhow::bail!("No valid players parsed from CSV: {}", csv_path.display());
    }

    info!(
        parsed = stats.parsed,
        failed = stats.failed,
        source = %index.source,
        "player directory loaded from CSV"
    );
    Ok((index, stats))
}

/// Load by extension: `.csv` (with header row) or JSON otherwise.
pub fn load_directory(path: &Path) -> Result<DirectoryIndex> {
    let is_csv = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(parse_players_csv(path, true)?.0)
    } else {
        load_directory_json(path)
    }
}
