//! Couple-scoped record lists
//!
//! Wedding cost lines, recurring costs and home items all belong to exactly
//! one couple and keep their insertion order. This repository stores them as
//! one ordered list per couple.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{CoupleId, HomeItem, HomeItemId, RecurringCost, RecurringCostId, WeddingCostLine};

use super::file_io::{read_json, write_json_atomic};

/// A record with a key that is unique within its couple
pub trait ScopedRecord: Clone + Serialize + DeserializeOwned {
    type Key: PartialEq;

    fn record_key(&self) -> Self::Key;
}

impl ScopedRecord for WeddingCostLine {
    type Key = String;

    fn record_key(&self) -> String {
        self.category.clone()
    }
}

impl ScopedRecord for RecurringCost {
    type Key = RecurringCostId;

    fn record_key(&self) -> RecurringCostId {
        self.id
    }
}

impl ScopedRecord for HomeItem {
    type Key = HomeItemId;

    fn record_key(&self) -> HomeItemId {
        self.id
    }
}

/// On-disk shape: one entry per couple
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CoupleRecords<T> {
    couple_id: CoupleId,
    records: Vec<T>,
}

/// Repository holding an ordered record list per couple
pub struct ScopedRepository<T: ScopedRecord> {
    path: Option<PathBuf>,
    records: RwLock<HashMap<CoupleId, Vec<T>>>,
}

impl<T: ScopedRecord> ScopedRepository<T> {
    /// Repository backed by `path`; `None` keeps records in memory only
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> PlannerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: Vec<CoupleRecords<T>> = read_json(path)?;

        let mut records = self
            .records
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        records.clear();
        for entry in file_data {
            records.entry(entry.couple_id).or_default().extend(entry.records);
        }

        Ok(())
    }

    pub fn save(&self) -> PlannerResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let records = self
            .records
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut file_data: Vec<CoupleRecords<T>> = records
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(couple_id, list)| CoupleRecords {
                couple_id: *couple_id,
                records: list.clone(),
            })
            .collect();
        file_data.sort_by_key(|entry| *entry.couple_id.as_uuid());

        write_json_atomic(path, &file_data)
    }

    /// All records of a couple in stored order
    pub fn list(&self, couple: CoupleId) -> PlannerResult<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(records.get(&couple).cloned().unwrap_or_default())
    }

    /// Append a record; fails if the key is already taken
    pub fn insert(&self, couple: CoupleId, record: T) -> PlannerResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let list = records.entry(couple).or_default();
        let key = record.record_key();
        if list.iter().any(|r| r.record_key() == key) {
            return Err(PlannerError::Storage("Record key already exists".into()));
        }
        list.push(record);
        Ok(())
    }

    /// Replace the record with the same key in place; false if absent
    pub fn update(&self, couple: CoupleId, record: T) -> PlannerResult<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = record.record_key();
        let slot = records
            .get_mut(&couple)
            .and_then(|list| list.iter_mut().find(|r| r.record_key() == key));

        match slot {
            Some(existing) => {
                *existing = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a record by key; false if absent
    pub fn remove(&self, couple: CoupleId, key: &T::Key) -> PlannerResult<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let Some(list) = records.get_mut(&couple) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|r| &r.record_key() != key);
        Ok(list.len() != before)
    }

    /// Replace the couple's whole list, returning the previous one
    pub fn replace_all(&self, couple: CoupleId, new_records: Vec<T>) -> PlannerResult<Vec<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(records.insert(couple, new_records).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn line(category: &str, planned: i64) -> WeddingCostLine {
        WeddingCostLine::new(category, Money::from_units(planned), Money::zero())
    }

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicate_keys() {
        let repo: ScopedRepository<WeddingCostLine> = ScopedRepository::new(None);
        let couple = CoupleId::new();

        repo.insert(couple, line("party", 1)).unwrap();
        repo.insert(couple, line("ceremony", 2)).unwrap();
        assert!(repo.insert(couple, line("party", 3)).is_err());

        let keys: Vec<_> = repo.list(couple).unwrap().into_iter().map(|l| l.category).collect();
        assert_eq!(keys, vec!["party", "ceremony"]);
    }

    #[test]
    fn test_records_are_scoped_per_couple() {
        let repo: ScopedRepository<WeddingCostLine> = ScopedRepository::new(None);
        let ana = CoupleId::new();
        let bia = CoupleId::new();

        repo.insert(ana, line("party", 1)).unwrap();
        assert!(repo.list(bia).unwrap().is_empty());
        assert!(!repo.remove(bia, &"party".to_string()).unwrap());
        assert!(repo.remove(ana, &"party".to_string()).unwrap());
    }

    #[test]
    fn test_update_in_place() {
        let repo: ScopedRepository<RecurringCost> = ScopedRepository::new(None);
        let couple = CoupleId::new();
        let mut cost = RecurringCost::new("Internet", Money::from_units(100));
        repo.insert(couple, cost.clone()).unwrap();

        cost.amount = Money::from_units(120);
        assert!(repo.update(couple, cost.clone()).unwrap());
        assert_eq!(repo.list(couple).unwrap()[0].amount, Money::from_units(120));

        let stranger = RecurringCost::new("Gym", Money::zero());
        assert!(!repo.update(couple, stranger).unwrap());
    }

    #[test]
    fn test_save_and_reload_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wedding_costs.json");
        let couple = CoupleId::new();

        let repo: ScopedRepository<WeddingCostLine> = ScopedRepository::new(Some(path.clone()));
        repo.replace_all(couple, vec![line("photography", 6000), line("Bar", 900)])
            .unwrap();
        repo.save().unwrap();

        let reloaded: ScopedRepository<WeddingCostLine> = ScopedRepository::new(Some(path));
        reloaded.load().unwrap();
        let lines = reloaded.list(couple).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].category, "Bar");
    }
}
