//! Housing configuration repository (one config per couple)

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{CoupleId, HousingConfig};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HousingEntry {
    couple_id: CoupleId,
    #[serde(flatten)]
    config: HousingConfig,
}

/// Repository for housing configurations
pub struct HousingRepository {
    path: Option<PathBuf>,
    configs: RwLock<HashMap<CoupleId, HousingConfig>>,
}

impl HousingRepository {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            configs: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> PlannerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: Vec<HousingEntry> = read_json(path)?;

        let mut configs = self
            .configs
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        configs.clear();
        for entry in file_data {
            configs.insert(entry.couple_id, entry.config);
        }

        Ok(())
    }

    pub fn save(&self) -> PlannerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let configs = self
            .configs
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = configs
            .iter()
            .map(|(couple_id, config)| HousingEntry {
                couple_id: *couple_id,
                config: config.clone(),
            })
            .collect();
        list.sort_by_key(|entry| *entry.couple_id.as_uuid());

        write_json_atomic(path, &list)
    }

    pub fn get(&self, couple: CoupleId) -> PlannerResult<Option<HousingConfig>> {
        let configs = self
            .configs
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(configs.get(&couple).cloned())
    }

    pub fn upsert(&self, couple: CoupleId, config: HousingConfig) -> PlannerResult<()> {
        let mut configs = self
            .configs
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        configs.insert(couple, config);
        Ok(())
    }
}
