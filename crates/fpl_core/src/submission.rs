//! # Optimizer Submission
//!
//! Turns user input (budget and transfer count as typed) plus a complete
//! board into an [`OptimizeRequest`]. Nothing here touches board state.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::board::{SquadBoard, SQUAD_SIZE};
use crate::optimizer::OptimizeRequest;

/// Largest transfer count the optimizer accepts
pub const MAX_TRANSFERS: u8 = 15;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error(
        "Please fill in all inputs and select 15 players \
         ({filled}/{required} slots filled, budget missing: {budget_missing}, \
         transfers missing: {transfers_missing})"
    )]
    IncompleteRoster {
        filled: usize,
        required: usize,
        budget_missing: bool,
        transfers_missing: bool,
    },

    #[error("Invalid budget '{0}': expected a non-negative number of millions")]
    InvalidBudget(String),

    #[error("Transfers must be between 1 and {max}, got {value}")]
    TransfersOutOfRange { value: i64, max: u8 },

    #[error("Invalid transfer count '{0}'")]
    InvalidTransfers(String),
}

impl SubmissionError {
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::IncompleteRoster { .. } => "INCOMPLETE_ROSTER",
            SubmissionError::InvalidBudget(_) => "INVALID_BUDGET",
            SubmissionError::TransfersOutOfRange { .. } => "TRANSFERS_OUT_OF_RANGE",
            SubmissionError::InvalidTransfers(_) => "INVALID_TRANSFERS",
        }
    }

    /// All submission errors are fixed by editing the inputs.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// Budget in tenths of a million.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Budget(u32);

impl Budget {
    pub const fn from_tenths(tenths: u32) -> Self {
        Budget(tenths)
    }

    pub const fn tenths(self) -> u32 {
        self.0
    }

    pub fn millions(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Parse a budget as typed: `"100.5"`, `"100,5"`, `" 99 "`.
    ///
    /// Values round to the nearest 0.1 million; negative values clamp to zero.
    pub fn parse(input: &str) -> Result<Self, SubmissionError> {
        let normalized = input.trim().replace(',', ".");
        let value: f64 = normalized
            .parse()
            .map_err(|_| SubmissionError::InvalidBudget(input.to_string()))?;
        if !value.is_finite() {
            return Err(SubmissionError::InvalidBudget(input.to_string()));
        }

        let tenths = (value.max(0.0) * 10.0).round();
        if tenths > f64::from(u32::MAX) {
            return Err(SubmissionError::InvalidBudget(input.to_string()));
        }
        Ok(Budget(tenths as u32))
    }
}

impl FromStr for Budget {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Budget::parse(s)
    }
}

/// `£100.5m`, or `£100m` for whole millions.
impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 10;
        match self.0 % 10 {
            0 => write!(f, "£{whole}m"),
            frac => write!(f, "£{whole}.{frac}m"),
        }
    }
}

/// Number of transfers, 1..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Transfers(u8);

impl Transfers {
    pub fn new(count: i64) -> Result<Self, SubmissionError> {
        if (1..=i64::from(MAX_TRANSFERS)).contains(&count) {
            Ok(Transfers(count as u8))
        } else {
            Err(SubmissionError::TransfersOutOfRange { value: count, max: MAX_TRANSFERS })
        }
    }

    pub fn parse(input: &str) -> Result<Self, SubmissionError> {
        let count: i64 = input
            .trim()
            .parse()
            .map_err(|_| SubmissionError::InvalidTransfers(input.to_string()))?;
        Self::new(count)
    }

    pub const fn count(self) -> u8 {
        self.0
    }
}

impl FromStr for Transfers {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transfers::parse(s)
    }
}

impl fmt::Display for Transfers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0 == 1 { "Transfer" } else { "Transfers" };
        write!(f, "{} {noun}", self.0)
    }
}

/// Collects the optimizer inputs that live outside the board.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterSubmission {
    budget: Option<Budget>,
    transfers: Option<Transfers>,
}

impl RosterSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_transfers(mut self, transfers: Transfers) -> Self {
        self.transfers = Some(transfers);
        self
    }

    pub fn budget(&self) -> Option<Budget> {
        self.budget
    }

    pub fn transfers(&self) -> Option<Transfers> {
        self.transfers
    }

    /// Build the wire request from a full board.
    ///
    /// # Errors
    /// [`SubmissionError::IncompleteRoster`] when any slot is empty or the
    /// budget or transfer count is unset.
    pub fn build_request(&self, board: &SquadBoard) -> Result<OptimizeRequest, SubmissionError> {
        let player_ids: Vec<_> =
            board.full_roster().into_iter().filter_map(|(_, p)| p.map(|p| p.id)).collect();

        match (self.budget, self.transfers) {
            (Some(budget), Some(transfers)) if player_ids.len() == SQUAD_SIZE => {
                debug!(budget = budget.tenths(), transfers = transfers.count(), "optimizer request built");
                Ok(OptimizeRequest {
                    budget: budget.tenths(),
                    transfers: transfers.count(),
                    player_ids,
                })
            }
            (budget, transfers) => Err(SubmissionError::IncompleteRoster {
                filled: player_ids.len(),
                required: SQUAD_SIZE,
                budget_missing: budget.is_none(),
                transfers_missing: transfers.is_none(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;
    use crate::test_fixtures::full_squad;

    #[test]
    fn test_budget_parse_accepts_comma_and_dot() {
        assert_eq!(Budget::parse("100.5").unwrap().tenths(), 1005);
        assert_eq!(Budget::parse("100,5").unwrap().tenths(), 1005);
        assert_eq!(Budget::parse(" 83 ").unwrap().tenths(), 830);
    }

    #[test]
    fn test_budget_rounds_to_tenth_and_clamps() {
        assert_eq!(Budget::parse("99.96").unwrap().tenths(), 1000);
        assert_eq!(Budget::parse("0.04").unwrap().tenths(), 0);
        assert_eq!(Budget::parse("-3").unwrap().tenths(), 0);
    }

    #[test]
    fn test_budget_rejects_garbage() {
        assert!(matches!(Budget::parse("lots"), Err(SubmissionError::InvalidBudget(_))));
        assert!(matches!(Budget::parse(""), Err(SubmissionError::InvalidBudget(_))));
        assert!(matches!(Budget::parse("inf"), Err(SubmissionError::InvalidBudget(_))));
    }

    #[test]
    fn test_budget_display() {
        assert_eq!(Budget::from_tenths(1005).to_string(), "£100.5m");
        assert_eq!(Budget::from_tenths(1000).to_string(), "£100m");
        assert_eq!(Budget::from_tenths(5).to_string(), "£0.5m");
    }

    #[test]
    fn test_transfers_range() {
        assert_eq!(Transfers::parse("1").unwrap().count(), 1);
        assert_eq!(Transfers::parse("15").unwrap().count(), 15);
        assert_eq!(
            Transfers::parse("0"),
            Err(SubmissionError::TransfersOutOfRange { value: 0, max: 15 })
        );
        assert!(matches!(Transfers::parse("16"), Err(SubmissionError::TransfersOutOfRange { .. })));
        assert!(matches!(Transfers::parse("two"), Err(SubmissionError::InvalidTransfers(_))));
    }

    #[test]
    fn test_transfers_display() {
        assert_eq!(Transfers::new(1).unwrap().to_string(), "1 Transfer");
        assert_eq!(Transfers::new(3).unwrap().to_string(), "3 Transfers");
    }

    #[test]
    fn test_build_request_in_slot_order() {
        let mut board = SquadBoard::new();
        board.reconcile(full_squad());
        let submission = RosterSubmission::new()
            .with_budget(Budget::parse("100.5").unwrap())
            .with_transfers(Transfers::new(2).unwrap());

        let request = submission.build_request(&board).unwrap();

        assert_eq!(request.budget, 1005);
        assert_eq!(request.transfers, 2);
        let expected: Vec<PlayerId> = full_squad().iter().map(|p| p.id).collect();
        assert_eq!(request.player_ids, expected);
    }

    #[test]
    fn test_build_request_rejects_partial_board() {
        let mut board = SquadBoard::new();
        board.reconcile(full_squad().into_iter().take(14));
        let submission = RosterSubmission::new()
            .with_budget(Budget::from_tenths(1000))
            .with_transfers(Transfers::new(1).unwrap());

        let err = submission.build_request(&board).unwrap_err();

        assert_eq!(
            err,
            SubmissionError::IncompleteRoster {
                filled: 14,
                required: 15,
                budget_missing: false,
                transfers_missing: false,
            }
        );
        assert_eq!(err.code(), "INCOMPLETE_ROSTER");
    }

    #[test]
    fn test_build_request_requires_budget_and_transfers() {
        let mut board = SquadBoard::new();
        board.reconcile(full_squad());

        let err = RosterSubmission::new().build_request(&board).unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::IncompleteRoster { filled: 15, budget_missing: true, transfers_missing: true, .. }
        ));
    }
}
