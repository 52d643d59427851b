//! User settings for Couple Planner
//!
//! Preferences that belong to this machine rather than to the shared couple
//! records: the active couple, the calculator mode and display options.

use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{CalculatorMode, CoupleId};

/// Current settings schema version
pub const SCHEMA_VERSION: u32 = 1;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Couple profile the commands operate on
    #[serde(default)]
    pub active_couple: Option<CoupleId>,

    /// Wedding calculator mode
    #[serde(default)]
    pub calculator_mode: CalculatorMode,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Whether `couple init` has completed
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            active_couple: None,
            calculator_mode: CalculatorMode::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            log_level: None,
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &PlannerPaths) -> PlannerResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PlannerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| PlannerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PlannerPaths) -> PlannerResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PlannerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PlannerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The active couple, or a configuration error telling the user to run init
    pub fn require_couple(&self) -> PlannerResult<CoupleId> {
        self.active_couple.ok_or_else(|| {
            PlannerError::Config("No couple profile yet. Run 'couple init --name <you>' first.".into())
        })
    }
}
