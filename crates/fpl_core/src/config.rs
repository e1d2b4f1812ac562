//! # Roster Configuration
//!
//! Behaviour switches for the squad board, with presets and an optional JSON
//! override file named by `FPL_ROSTER_CONFIG_PATH`.
//!
//! ```rust
//! use fpl_core::config::RosterConfig;
//!
//! let strict = RosterConfig::default();
//! let lenient = RosterConfig::lenient();
//! assert!(strict.enforce_slot_category);
//! assert!(!lenient.enforce_slot_category);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};
use thiserror::Error;

use crate::models::Formation;

pub const ROSTER_CONFIG_PATH_ENV: &str = "FPL_ROSTER_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Reject direct assignments whose player category differs from the slot.
    pub enforce_slot_category: bool,
    /// Log a warning when reconciliation drops players that do not fit.
    pub warn_on_overflow: bool,
    /// Formation a fresh board starts with.
    pub default_formation: Formation,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            enforce_slot_category: true,
            warn_on_overflow: true,
            default_formation: Formation::F442,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read roster config from '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse roster config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RosterConfig {
    /// Category checks on, overflow warnings on (default)
    pub fn strict() -> Self {
        Self::default()
    }

    /// Trusts the caller to pre-filter candidates by category, the way the
    /// search widget does
    pub fn lenient() -> Self {
        Self { enforce_slot_category: false, ..Self::default() }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&content)
    }

    /// Load from the file named by [`ROSTER_CONFIG_PATH_ENV`], or defaults when
    /// the variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(env::var(ROSTER_CONFIG_PATH_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Result<Self, ConfigError> {
        match value.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Self::from_path(Path::new(path)),
            _ => Ok(Self::default()),
        }
    }
}
