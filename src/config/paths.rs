//! Path resolution for studybuddy configuration and data files.
//!
//! All data is stored in `~/.studybuddy/` (or `$STUDYBUDDY_HOME`):
//! - `config.yaml` - Main configuration file
//! - `studybuddy.db` - SQLite database of completed focus intervals
//! - `logs/` - Daily-rolling log files

use std::path::PathBuf;

use crate::error::StudyError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "STUDYBUDDY_HOME";

/// Paths to studybuddy configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.studybuddy/`
    pub root: PathBuf,
    /// Config file: `~/.studybuddy/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.studybuddy/studybuddy.db`
    pub database: PathBuf,
    /// Logs directory: `~/.studybuddy/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Resolve paths from `$STUDYBUDDY_HOME`, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, StudyError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            StudyError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".studybuddy")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("studybuddy.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudyError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    StudyError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}
