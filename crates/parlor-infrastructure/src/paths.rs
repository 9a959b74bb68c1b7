//! Unified path management for Parlor files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/parlor/            # Config directory (platform dependent)
//! ├── config.toml              # Application configuration
//! └── logs/                    # Application logs
//!     └── parlor.log.YYYY-MM-DD
//!
//! <data_dir>/                  # DATA_DIR, config, /data or ./data
//! └── chatbot-data.json        # Durable chat document
//! ```

use std::path::{Path, PathBuf};

use parlor_core::{ParlorError, Result};

const APP_DIR_NAME: &str = "parlor";

/// File name of the durable chat document inside the data directory.
pub const DATA_FILE_NAME: &str = "chatbot-data.json";

pub struct ParlorPaths;

impl ParlorPaths {
    /// Returns the Parlor configuration directory (e.g. `~/.config/parlor/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| ParlorError::config("Cannot find configuration directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory for rolling log files.
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("logs"))
    }

    /// Returns the durable document path inside `data_dir`.
    pub fn data_file(data_dir: &Path) -> PathBuf {
        data_dir.join(DATA_FILE_NAME)
    }
}
