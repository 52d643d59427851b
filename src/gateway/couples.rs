//! Couple profile repository
//!
//! Manages loading and saving couple profiles to couples.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{CoupleId, CoupleProfile};

use super::file_io::{read_json, write_json_atomic};

/// Repository for couple profiles
pub struct CoupleRepository {
    path: Option<PathBuf>,
    couples: RwLock<HashMap<CoupleId, CoupleProfile>>,
}

impl CoupleRepository {
    /// Repository backed by `path`; `None` keeps records in memory only
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            couples: RwLock::new(HashMap::new()),
        }
    }

    /// Load profiles from disk
    pub fn load(&self) -> PlannerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: Vec<CoupleProfile> = read_json(path)?;

        let mut couples = self
            .couples
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        couples.clear();
        for couple in file_data {
            couples.insert(couple.id, couple);
        }

        Ok(())
    }

    /// Save profiles to disk, oldest first
    pub fn save(&self) -> PlannerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let couples = self
            .couples
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = couples.values().cloned().collect();
        list.sort_by_key(|c| c.created_at);

        write_json_atomic(path, &list)
    }

    /// Get a profile by ID
    pub fn get(&self, id: CoupleId) -> PlannerResult<Option<CoupleProfile>> {
        let couples = self
            .couples
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(couples.get(&id).cloned())
    }

    /// All profiles, oldest first
    pub fn get_all(&self) -> PlannerResult<Vec<CoupleProfile>> {
        let couples = self
            .couples
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = couples.values().cloned().collect();
        list.sort_by_key(|c| c.created_at);
        Ok(list)
    }

    /// Insert or replace a profile
    pub fn upsert(&self, couple: CoupleProfile) -> PlannerResult<()> {
        let mut couples = self
            .couples
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        couples.insert(couple.id, couple);
        Ok(())
    }

    pub fn exists(&self, id: CoupleId) -> PlannerResult<bool> {
        let couples = self
            .couples
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(couples.contains_key(&id))
    }
}
