//! Editor configuration
//!
//! Tunables for the editing core. Missing fields fall back to their defaults
//! so a partial config file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::action::DEFAULT_CAPACITY;

/// Cells whose screen width or height is at or below this are discarded
pub const DEFAULT_MIN_CELL_SIZE: f64 = 15.0;

/// Scale change per zoom key press
pub const DEFAULT_ZOOM_STEP: f64 = 0.2;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error reading a configuration file
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`EditorConfig`]
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Editing-core settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undoable actions
    pub history_capacity: usize,

    /// Minimum cell size in screen pixels
    pub min_cell_size: f64,

    /// Scale change per zoom key press
    pub zoom_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be at least 1".into()));
        }
        if !self.min_cell_size.is_finite() || self.min_cell_size < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_cell_size must be a non-negative number, got {}",
                self.min_cell_size
            )));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "zoom_step must be positive, got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }
}
