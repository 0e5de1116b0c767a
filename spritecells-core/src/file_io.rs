//! Session persistence
//!
//! A session is stored as a small JSON document: the active input mode, the
//! view transform and the list of cells. Stores never fail to load: a
//! missing, unreadable or malformed state is logged, the store is reset to
//! empty, and the editor starts from the default state.

use crate::cell::Cell;
use crate::tool::InputMode;
use crate::transform::Transform;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while saving or decoding state
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted form of a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub label: String,
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl From<&Cell> for CellRecord {
    fn from(cell: &Cell) -> Self {
        Self {
            label: cell.label.clone(),
            top: cell.top,
            left: cell.left,
            right: cell.right,
            bottom: cell.bottom,
        }
    }
}

impl CellRecord {
    /// Rebuild a cell with a fresh id
    pub fn to_cell(&self) -> Cell {
        Cell::new(self.label.clone(), self.top, self.left, self.right, self.bottom)
    }
}

/// Everything needed to resume an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default = "default_mode")]
    pub mode: InputMode,

    #[serde(default)]
    pub transform: Transform,

    #[serde(default)]
    pub cells: Vec<CellRecord>,
}

fn default_mode() -> InputMode {
    InputMode::Image
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            transform: Transform::new(),
            cells: Vec::new(),
        }
    }
}

impl PersistedState {
    /// Decode a stored state; blank input means "nothing stored"
    pub fn from_json(json: &str) -> Result<Option<Self>, PersistError> {
        if json.trim().is_empty() {
            return Ok(None);
        }
        let state: PersistedState = serde_json::from_str(json)?;
        if state.transform.scale < 0.0 || !state.transform.scale.is_finite() {
            return Err(PersistError::Json(serde::de::Error::custom(format!(
                "invalid scale {}",
                state.transform.scale
            ))));
        }
        Ok(Some(state))
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Storage backend for session state
pub trait Persistence {
    /// Load the stored state, or the default state if there is none or it
    /// cannot be decoded. Never fails.
    fn load(&mut self) -> PersistedState;

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError>;
}

/// Session stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Try to load, returning error if something goes wrong
    fn try_load(&self) -> Result<Option<PersistedState>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        PersistedState::from_json(&contents)
    }

    /// Truncate the stored state so the next load starts empty
    fn reset(&self) {
        if let Err(e) = std::fs::write(&self.path, "") {
            warn!("Failed to reset session file {:?}: {}", self.path, e);
        }
    }
}

impl Persistence for JsonFileStore {
    fn load(&mut self) -> PersistedState {
        match self.try_load() {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load session from {:?}: {}", self.path, e);
                self.reset();
                PersistedState::default()
            }
        }
    }

    /// Save atomically (write to temp, then rename)
    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = state.to_json()?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, &self.path)?;
        Ok(())
    }
}

/// Session stored in memory as a JSON string
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub contents: String,
}

impl MemoryStore {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl Persistence for MemoryStore {
    fn load(&mut self) -> PersistedState {
        match PersistedState::from_json(&self.contents) {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to decode stored session: {}", e);
                self.contents.clear();
                PersistedState::default()
            }
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        self.contents = state.to_json()?;
        Ok(())
    }
}
