//! Path management for Lodgebook
//!
//! ## Path Resolution Order
//!
//! 1. `LODGEBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/lodgebook` or `~/.config/lodgebook`
//! 3. Windows: `%APPDATA%\lodgebook`

use std::path::PathBuf;

use crate::error::LodgeError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "LODGEBOOK_DATA_DIR";

/// Manages all paths used by Lodgebook
#[derive(Debug, Clone)]
pub struct LodgePaths {
    base_dir: PathBuf,
}

impl LodgePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, LodgeError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to bookings.json
    pub fn bookings_file(&self) -> PathBuf {
        self.data_dir().join("bookings.json")
    }

    /// Get the path to monthly.json (aggregated analytics)
    pub fn monthly_file(&self) -> PathBuf {
        self.data_dir().join("monthly.json")
    }

    /// Get the path of the pending import preview awaiting confirmation
    pub fn import_preview_file(&self) -> PathBuf {
        self.data_dir().join("import_preview.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), LodgeError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LodgeError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LodgeError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Lodgebook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LodgeError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                LodgeError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("lodgebook"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LodgeError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LodgeError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("lodgebook"))
}
