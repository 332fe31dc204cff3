//! Path management for monthwise
//!
//! Resolves where persisted data (settings, status records) lives.
//!
//! ## Path Resolution Order
//!
//! 1. `MONTHWISE_DATA_DIR` environment variable (if set)
//! 2. The platform data directory via the `directories` crate
//!    (e.g. `~/.local/share/monthwise` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BudgetError;

/// Manages all paths used by monthwise
#[derive(Debug, Clone)]
pub struct MonthwisePaths {
    /// Base directory for all monthwise data
    base_dir: PathBuf,
}

impl MonthwisePaths {
    /// Create a new MonthwisePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BudgetError> {
        let base_dir = if let Ok(custom) = std::env::var("MONTHWISE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "monthwise")
                .ok_or_else(|| {
                    BudgetError::Config("Could not determine a data directory".into())
                })?
                .data_dir()
                .to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create MonthwisePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to statuses.json (category-month status records)
    pub fn statuses_file(&self) -> PathBuf {
        self.data_dir().join("statuses.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
