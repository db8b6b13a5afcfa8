//! Policy configuration.
//!
//! Every threshold the engine enforces lives here as an explicit, immutable
//! value rather than a free-floating constant, so tests and deployments can
//! override limits without touching global state. The `Default` impls equal
//! the production constants; a TOML file may override any subset.

use crate::error::ConfigError;
use crate::geo::MapBounds;
use serde::Deserialize;

fn default_spots_per_day() -> u32 {
    5
}

fn default_spots_per_week() -> u32 {
    20
}

fn default_min_spot_interval_minutes() -> i64 {
    5
}

// Raise to 24 in production deployments.
fn default_min_account_age_hours() -> i64 {
    0
}

fn default_min_description_length() -> usize {
    10
}

fn default_duplicate_radius_km() -> f64 {
    0.1
}

fn default_auto_flag_threshold() -> u32 {
    3
}

/// Anti-spam thresholds for spot creation and auto-flagging.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpamLimits {
    #[serde(default = "default_spots_per_day")]
    pub spots_per_day: u32,
    #[serde(default = "default_spots_per_week")]
    pub spots_per_week: u32,
    #[serde(default = "default_min_spot_interval_minutes")]
    pub min_spot_interval_minutes: i64,
    #[serde(default = "default_min_account_age_hours")]
    pub min_account_age_hours: i64,
    #[serde(default = "default_min_description_length")]
    pub min_description_length: usize,
    /// Spots closer than this to an existing spot by the same owner are
    /// rejected as duplicates.
    #[serde(default = "default_duplicate_radius_km")]
    pub duplicate_radius_km: f64,
    /// Number of reports at which a target is flagged for review.
    #[serde(default = "default_auto_flag_threshold")]
    pub auto_flag_threshold: u32,
}

impl Default for SpamLimits {
    fn default() -> Self {
        Self {
            spots_per_day: default_spots_per_day(),
            spots_per_week: default_spots_per_week(),
            min_spot_interval_minutes: default_min_spot_interval_minutes(),
            min_account_age_hours: default_min_account_age_hours(),
            min_description_length: default_min_description_length(),
            duplicate_radius_km: default_duplicate_radius_km(),
            auto_flag_threshold: default_auto_flag_threshold(),
        }
    }
}

/// Inclusive character-count bounds for a text field, applied after
/// trimming leading and trailing whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FieldBounds {
    pub min: usize,
    pub max: usize,
}

fn default_title_bounds() -> FieldBounds {
    FieldBounds { min: 5, max: 60 }
}

fn default_description_bounds() -> FieldBounds {
    FieldBounds { min: 10, max: 500 }
}

fn default_spot_name_bounds() -> FieldBounds {
    FieldBounds { min: 3, max: 50 }
}

fn default_spot_description_bounds() -> FieldBounds {
    FieldBounds { min: 10, max: 300 }
}

fn default_display_name_bounds() -> FieldBounds {
    FieldBounds { min: 3, max: 30 }
}

fn default_password_bounds() -> FieldBounds {
    FieldBounds { min: 6, max: 50 }
}

/// Length bounds for every user-editable text field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentLimits {
    #[serde(default = "default_title_bounds")]
    pub title: FieldBounds,
    #[serde(default = "default_description_bounds")]
    pub description: FieldBounds,
    #[serde(default = "default_spot_name_bounds")]
    pub spot_name: FieldBounds,
    #[serde(default = "default_spot_description_bounds")]
    pub spot_description: FieldBounds,
    #[serde(default = "default_display_name_bounds")]
    pub display_name: FieldBounds,
    #[serde(default = "default_password_bounds")]
    pub password: FieldBounds,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            title: default_title_bounds(),
            description: default_description_bounds(),
            spot_name: default_spot_name_bounds(),
            spot_description: default_spot_description_bounds(),
            display_name: default_display_name_bounds(),
            password: default_password_bounds(),
        }
    }
}

/// Complete policy configuration for the engine.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub limits: SpamLimits,
    #[serde(default)]
    pub content: ContentLimits,
    #[serde(default)]
    pub map: MapBounds,
}

impl PolicyConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{path}: {e}")))?;
        toml::from_str(&text).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
