//! Path management for Couple Planner
//!
//! ## Path Resolution Order
//!
//! 1. `COUPLE_PLANNER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories::ProjectDirs`
//!    (`~/.config/couple-planner` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{PlannerError, PlannerResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "COUPLE_PLANNER_DATA_DIR";

/// Manages all paths used by Couple Planner
#[derive(Debug, Clone)]
pub struct PlannerPaths {
    base_dir: PathBuf,
}

impl PlannerPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> PlannerResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the record files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn couples_file(&self) -> PathBuf {
        self.data_dir().join("couples.json")
    }

    pub fn wedding_costs_file(&self) -> PathBuf {
        self.data_dir().join("wedding_costs.json")
    }

    pub fn housing_file(&self) -> PathBuf {
        self.data_dir().join("housing.json")
    }

    pub fn recurring_costs_file(&self) -> PathBuf {
        self.data_dir().join("recurring_costs.json")
    }

    pub fn home_items_file(&self) -> PathBuf {
        self.data_dir().join("home_items.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> PlannerResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PlannerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PlannerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether `couple init` has been run (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> PlannerResult<PathBuf> {
    ProjectDirs::from("", "", "couple-planner")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PlannerError::Config("Could not determine a home directory".into()))
}
