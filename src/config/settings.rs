//! User settings for monthwise
//!
//! A small persisted preference set: how amounts are rendered and which time
//! zone buckets transaction timestamps into calendar months.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::paths::MonthwisePaths;
use crate::error::{BudgetError, BudgetResult};

/// User settings for monthwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Offset from UTC, in minutes, used to bucket transaction timestamps
    /// into calendar months
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Whether new categories carry unspent money into the next month
    #[serde(default = "default_carry_over")]
    pub carry_over_default: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_carry_over() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            utc_offset_minutes: 0,
            carry_over_default: default_carry_over(),
        }
    }
}

impl Settings {
    /// The configured zone as a chrono offset
    pub fn time_zone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
    }

    /// Load settings, creating the file with defaults when missing
    pub fn load_or_create(paths: &MonthwisePaths) -> BudgetResult<Self> {
        let path = paths.settings_file();
        if !path.exists() {
            let settings = Self::default();
            settings.save(paths)?;
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| BudgetError::Config(format!("Failed to read settings: {}", e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Persist settings to disk
    pub fn save(&self, paths: &MonthwisePaths) -> BudgetResult<()> {
        paths.ensure_directories()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), json)
            .map_err(|e| BudgetError::Config(format!("Failed to write settings: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.utc_offset_minutes, 0);
        assert!(settings.carry_over_default);
    }

    #[test]
    fn test_time_zone() {
        let mut settings = Settings::default();
        settings.utc_offset_minutes = 120;
        assert_eq!(
            settings.time_zone(),
            FixedOffset::east_opt(2 * 3600).unwrap()
        );

        // An out-of-range offset falls back to UTC
        settings.utc_offset_minutes = 100_000;
        assert_eq!(settings.time_zone(), FixedOffset::east_opt(0).unwrap());
    }

    #[test]
    fn test_load_or_create_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MonthwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        // First call creates the file with defaults
        let created = Settings::load_or_create(&paths).unwrap();
        assert!(paths.settings_file().exists());

        // Modify and save
        let mut settings = created;
        settings.currency_symbol = "€".into();
        settings.utc_offset_minutes = 60;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.utc_offset_minutes, 60);
    }
}
