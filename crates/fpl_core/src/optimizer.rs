//! Optimizer wire contract and the synchronous seam the board calls through.
//!
//! The optimizer itself (transport, scoring) lives outside this crate; the
//! board only needs something that turns an [`OptimizeRequest`] into a
//! finished [`OptimizeResponse`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Player, PlayerId};

/// Request body sent to the optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    /// Budget in tenths of a million (the user's `100.5` becomes `1005`).
    /// Serialized as `budget` to match the optimizer backend's request body.
    #[serde(alias = "budgetTenths")]
    pub budget: u32,
    /// Free transfers, 1..=15
    pub transfers: u8,
    /// Current squad in slot-id order
    pub player_ids: Vec<PlayerId>,
}

/// Optimizer answer. Only `players` is fed back into the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<f64>,
}

impl OptimizeResponse {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players, budget: None, total_points: None }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("Optimizer unavailable: {0}")]
    Unavailable(String),

    #[error("Optimizer rejected the request: {0}")]
    Rejected(String),
}

impl OptimizerError {
    pub fn code(&self) -> &'static str {
        match self {
            OptimizerError::Unavailable(_) => "OPTIMIZER_UNAVAILABLE",
            OptimizerError::Rejected(_) => "OPTIMIZER_REJECTED",
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, OptimizerError::Unavailable(_))
    }
}

pub trait Optimizer {
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, OptimizerError>;
}

impl<F> Optimizer for F
where
    F: Fn(&OptimizeRequest) -> Result<OptimizeResponse, OptimizerError>,
{
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, OptimizerError> {
        self(request)
    }
}

/// JSON schemas for the request and response, keyed by type name.
pub fn wire_schemas() -> serde_json::Value {
    serde_json::json!({
        "OptimizeRequest": schemars::schema_for!(OptimizeRequest),
        "OptimizeResponse": schemars::schema_for!(OptimizeResponse),
    })
}
