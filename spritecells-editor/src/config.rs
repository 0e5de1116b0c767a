use log::warn;
use serde::{Deserialize, Serialize};
use spritecells_core::config::EditorConfig;
use std::path::{Path, PathBuf};

/// Maximum number of remembered session files
const MAX_RECENT: usize = 10;

/// Application configuration (persistent)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Editing tunables, stored at the top level of the file
    #[serde(flatten)]
    pub editor: EditorConfig,

    /// Recent session files (newest first)
    #[serde(default)]
    pub recent_sessions: Vec<PathBuf>,
}

impl AppConfig {
    /// Load config from the standard location, or `path` when given.
    /// Returns default config if the file doesn't exist or is malformed.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Some(p) => p,
                None => {
                    warn!("Could not determine config directory, using defaults");
                    return Self::default();
                }
            },
        };
        match Self::try_load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        config.editor.validate()?;
        Ok(config)
    }

    /// Save config atomically (write to temp, then rename).
    /// Logs the error but doesn't fail the command.
    pub fn save(&self, path: Option<&Path>) {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::config_path) else {
            return;
        };
        if let Err(e) = self.try_save(&path) {
            warn!("Failed to save config {:?}: {}", path, e);
        }
    }

    fn try_save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, path)?;
        Ok(())
    }

    /// Cross-platform config file path
    pub fn config_path() -> Option<PathBuf> {
        use directories::ProjectDirs;

        let proj_dirs = ProjectDirs::from("", "", "spritecells")?;
        Some(proj_dirs.config_dir().join("config.json"))
    }

    /// Move a session file to the front of the recent list.
    ///
    /// Paths that cannot be canonicalized (deleted files) are skipped.
    pub fn add_recent_session(&mut self, path: &Path) {
        let canonical = match path.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                warn!("Could not canonicalize path {:?}: {}", path, e);
                return;
            }
        };
        self.recent_sessions.retain(|p| p != &canonical);
        self.recent_sessions.insert(0, canonical);
        self.recent_sessions.truncate(MAX_RECENT);
    }

    /// Recent sessions that still exist, newest first
    pub fn recent_sessions(&self) -> Vec<PathBuf> {
        self.recent_sessions
            .iter()
            .filter(|p| p.exists())
            .cloned()
            .collect()
    }
}
