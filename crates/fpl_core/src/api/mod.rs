//! JSON API envelope shared by every endpoint.

pub mod roster_json;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::RosterError;
use crate::optimizer::OptimizerError;
use crate::submission::SubmissionError;

pub use roster_json::{
    apply_command, apply_command_json, apply_commands_json, full_roster_json, CommandOutcome,
    CommandQueue, RosterCommand, RosterEntry,
};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(
        code: &str,
        message: &str,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: Some(details) }
    }
}

impl From<&RosterError> for ApiError {
    fn from(error: &RosterError) -> Self {
        let mut details = HashMap::new();
        match error {
            RosterError::DuplicateAssignment { player_id, existing_slot, requested_slot } => {
                details.insert("player_id".to_string(), player_id.0.into());
                details.insert("existing_slot".to_string(), existing_slot.0.into());
                details.insert("requested_slot".to_string(), requested_slot.0.into());
            }
            RosterError::CategoryMismatch { player_id, slot_id, .. } => {
                details.insert("player_id".to_string(), player_id.0.into());
                details.insert("slot_id".to_string(), slot_id.0.into());
            }
            _ => {}
        }
        details.insert("recoverable".to_string(), error.is_recoverable().into());
        Self::with_details(error.code(), &error.to_string(), details)
    }
}

impl From<&SubmissionError> for ApiError {
    fn from(error: &SubmissionError) -> Self {
        Self::new(error.code(), &error.to_string())
    }
}

impl From<&OptimizerError> for ApiError {
    fn from(error: &OptimizerError) -> Self {
        Self::new(error.code(), &error.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Serialize, falling back to an empty object if serialization fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
