//! fpl-squad CLI
//!
//! Search a player directory, lay a roster out on the squad board, and build
//! or replay optimizer requests.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use fpl_core::{
    Budget, PlayerDirectory, PositionCategory, RosterConfig, RosterSubmission, SearchQuery,
    SquadBoard, Transfers,
};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "fpl-squad")]
#[command(about = "Inspect fantasy squads and optimizer payloads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Search a player directory by name within one position
    Search {
        /// Player directory file (JSON array or CSV)
        #[arg(long)]
        players: PathBuf,

        /// Position: GK, DEF, MID or FWD
        #[arg(long)]
        category: PositionCategory,

        /// Name fragment, at least 2 characters
        #[arg(long)]
        query: String,
    },

    /// List players by predicted points for the next gameweek, highest first
    Predictions {
        /// Player directory file (JSON array or CSV)
        #[arg(long)]
        players: PathBuf,

        /// Only this position: GK, DEF, MID or FWD
        #[arg(long)]
        category: Option<PositionCategory>,

        /// Number of players to list
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Lay a roster out on the board and print it
    Board {
        /// Roster JSON file
        #[arg(long)]
        roster: PathBuf,

        /// Formation, e.g. "4-4-2" or "352"
        #[arg(long)]
        formation: Option<String>,
    },

    /// Print the optimizer request for a full roster
    Request {
        /// Roster JSON file
        #[arg(long)]
        roster: PathBuf,

        /// Budget in millions, e.g. "100.5"
        #[arg(long)]
        budget: String,

        /// Number of transfers (1-15)
        #[arg(long)]
        transfers: String,
    },

    /// Replay a saved optimizer response onto a roster and print the board
    Apply {
        /// Roster JSON file
        #[arg(long)]
        roster: PathBuf,

        /// Saved optimizer response JSON file
        #[arg(long)]
        response: PathBuf,

        /// Formation, e.g. "4-4-2" or "352"
        #[arg(long)]
        formation: Option<String>,

        /// Budget in millions
        #[arg(long, default_value = "100")]
        budget: String,

        /// Number of transfers (1-15)
        #[arg(long, default_value = "1")]
        transfers: String,
    },

    /// Print the optimizer request/response JSON schema
    Schema,
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fpl_core=info,fpl_tools=info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { players, category, query } => {
            let directory = fpl_tools::load_directory(&players)?;
            let query = SearchQuery::new(category, query)?;
            let hits = directory.search(&query);

            for player in &hits {
                let cost = player
                    .now_cost
                    .map(|c| Budget::from_tenths(c).to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>6}  {:<4} {:<24} {}",
                    player.id.to_string(),
                    player.category.to_string(),
                    player.display_name(),
                    cost
                );
            }
            println!("{} match(es)", hits.len());
        }

        Commands::Predictions { players, category, limit } => {
            let directory = fpl_tools::load_directory(&players)?;
            for player in directory.top_predictions(category, limit) {
                let prediction = player
                    .prediction
                    .filter(|p| !p.is_nan())
                    .map(|p| format!("{p:.2}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>6}  {:<4} {:<24} {:>6}  form {:<5} total {}",
                    player.id.to_string(),
                    player.category.to_string(),
                    player.display_name(),
                    prediction,
                    extra_field(player, "form"),
                    extra_field(player, "total_points")
                );
            }
        }

        Commands::Board { roster, formation } => {
            let board = load_board(&roster, formation.as_deref())?;
            println!("{}", board.partition());
        }

        Commands::Request { roster, budget, transfers } => {
            let board = load_board(&roster, None)?;
            let request = RosterSubmission::new()
                .with_budget(Budget::parse(&budget)?)
                .with_transfers(Transfers::parse(&transfers)?)
                .build_request(&board)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }

        Commands::Apply { roster, response, formation, budget, transfers } => {
            let mut board = load_board(&roster, formation.as_deref())?;
            let request = RosterSubmission::new()
                .with_budget(Budget::parse(&budget)?)
                .with_transfers(Transfers::parse(&transfers)?)
                .build_request(&board)?;

            let optimizer = fpl_tools::FileOptimizer::from_path(&response)?;
            let report = board.apply_optimizer(&optimizer, &request)?;

            println!("{}", board.partition());
            if !report.dropped.is_empty() {
                let dropped: Vec<String> = report.dropped.iter().map(ToString::to_string).collect();
                println!("Dropped: {}", dropped.join(", "));
            }
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&fpl_core::optimizer::wire_schemas())?);
        }
    }

    Ok(())
}

/// Directory fields the board does not model, e.g. `form` ("6.2") or
/// `total_points` (120).
#[cfg(feature = "cli")]
fn extra_field(player: &fpl_core::Player, key: &str) -> String {
    match player.extra.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(feature = "cli")]
fn load_board(roster: &Path, formation: Option<&str>) -> Result<SquadBoard> {
    let config = RosterConfig::from_env().context("Failed to load roster config")?;
    let mut board = SquadBoard::with_config(config);
    if let Some(formation) = formation {
        board.set_formation(formation);
    }
    board.reconcile(fpl_tools::load_roster(roster)?);
    Ok(board)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("fpl-squad CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
