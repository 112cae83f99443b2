//! User settings for Lodgebook
//!
//! Holds the hotel context the import pipeline runs under, the defaults the
//! row mapper substitutes for missing columns, and the occupancy estimator
//! constants used by the monthly aggregator.

use serde::{Deserialize, Serialize};

use super::paths::LodgePaths;
use crate::error::LodgeError;
use crate::models::{BookingStatus, Money};

/// The tenant (lodge/hotel) whose data is being managed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelContext {
    /// Tenant identifier
    #[serde(default = "default_hotel_id")]
    pub hotel_id: String,

    /// Display name of the property
    #[serde(default = "default_hotel_name")]
    pub name: String,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_hotel_id() -> String {
    "default".to_string()
}

fn default_hotel_name() -> String {
    "My Lodge".to_string()
}

fn default_currency() -> String {
    "R".to_string()
}

impl Default for HotelContext {
    fn default() -> Self {
        Self {
            hotel_id: default_hotel_id(),
            name: default_hotel_name(),
            currency_symbol: default_currency(),
        }
    }
}

/// Values substituted by the row mapper when a column is missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportDefaults {
    /// Per-night rate used to estimate a missing amount
    pub nightly_rate: Money,
    pub adults: u32,
    pub kids: u32,
    pub settlement_method: String,
    pub referral_source: String,
    pub country: String,
    pub room_type: String,
    pub status: BookingStatus,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            nightly_rate: Money::from_cents(250_000),
            adults: 2,
            kids: 0,
            settlement_method: "Card".to_string(),
            referral_source: "Other".to_string(),
            country: "South Africa".to_string(),
            room_type: "Standard".to_string(),
            status: BookingStatus::CheckedOut,
        }
    }
}

/// Constants of the placeholder occupancy estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OccupancyRules {
    /// Occupancy assigned to a month seen for the first time
    pub new_month_percent: f64,
    /// Increment applied per additional booking in a known month
    pub step: f64,
    pub cap: f64,
}

impl Default for OccupancyRules {
    fn default() -> Self {
        Self {
            new_month_percent: 50.0,
            step: 1.0,
            cap: 100.0,
        }
    }
}

/// User settings for Lodgebook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub hotel: HotelContext,

    #[serde(default)]
    pub import: ImportDefaults,

    #[serde(default)]
    pub occupancy: OccupancyRules,

    /// Fallback tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Date format preference (strftime format) for display
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            hotel: HotelContext::default(),
            import: ImportDefaults::default(),
            occupancy: OccupancyRules::default(),
            log_level: default_log_level(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or build defaults if the file doesn't exist
    pub fn load_or_create(paths: &LodgePaths) -> Result<Self, LodgeError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LodgeError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LodgeError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LodgePaths) -> Result<(), LodgeError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LodgeError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LodgeError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.import.nightly_rate, Money::from_cents(250_000));
        assert_eq!(settings.import.adults, 2);
        assert_eq!(settings.import.kids, 0);
        assert_eq!(settings.import.settlement_method, "Card");
        assert_eq!(settings.occupancy.new_month_percent, 50.0);
        assert_eq!(settings.hotel.currency_symbol, "R");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LodgePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.hotel.name = "Karoo Rest".to_string();
        settings.import.nightly_rate = Money::from_cents(180_000);

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.hotel.name, "Karoo Rest");
        assert_eq!(loaded.import.nightly_rate, Money::from_cents(180_000));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LodgePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"import": {"adults": 1}}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.import.adults, 1);
        assert_eq!(loaded.import.settlement_method, "Card");
        assert_eq!(loaded.log_level, "warn");
    }
}
