//! Data gateway for Couple Planner
//!
//! [`DataGateway`] is the persistence contract every service receives by
//! reference. [`JsonGateway`] implements it with per-record repositories that
//! write JSON files atomically; each mutating call is persisted before it
//! returns.

pub mod couples;
pub mod file_io;
pub mod housing;
pub mod scoped;

pub use couples::CoupleRepository;
pub use file_io::{read_json, write_json_atomic};
pub use housing::HousingRepository;
pub use scoped::{ScopedRecord, ScopedRepository};

use tracing::debug;

use crate::config::paths::PlannerPaths;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    CoupleId, CoupleProfile, HomeItem, HomeItemId, HousingConfig, RecurringCost, RecurringCostId,
    WeddingCostLine,
};

/// Persistence contract for couple-scoped records
///
/// Every call either succeeds or returns an error; there are no partial
/// results.
pub trait DataGateway {
    fn list_couples(&self) -> PlannerResult<Vec<CoupleProfile>>;
    fn create_couple(&self, profile: CoupleProfile) -> PlannerResult<CoupleProfile>;
    fn get_couple(&self, id: CoupleId) -> PlannerResult<Option<CoupleProfile>>;
    fn update_couple(&self, profile: &CoupleProfile) -> PlannerResult<()>;

    /// Wedding cost rows in stored order
    fn list_wedding_costs(&self, couple: CoupleId) -> PlannerResult<Vec<WeddingCostLine>>;

    /// Replace the couple's full set of wedding cost rows
    ///
    /// Rows not present in `lines` are deleted. Rows that already existed keep
    /// their notes when the incoming row carries none.
    fn save_all_wedding_costs(&self, couple: CoupleId, lines: &[WeddingCostLine])
        -> PlannerResult<()>;

    fn get_housing(&self, couple: CoupleId) -> PlannerResult<Option<HousingConfig>>;
    fn upsert_housing(&self, couple: CoupleId, config: &HousingConfig) -> PlannerResult<()>;

    fn list_recurring_costs(&self, couple: CoupleId) -> PlannerResult<Vec<RecurringCost>>;
    fn add_recurring_cost(&self, couple: CoupleId, cost: &RecurringCost) -> PlannerResult<()>;
    fn update_recurring_cost(&self, couple: CoupleId, cost: &RecurringCost) -> PlannerResult<()>;
    fn delete_recurring_cost(&self, couple: CoupleId, id: RecurringCostId) -> PlannerResult<bool>;

    fn list_home_items(&self, couple: CoupleId) -> PlannerResult<Vec<HomeItem>>;
    fn add_home_item(&self, couple: CoupleId, item: &HomeItem) -> PlannerResult<()>;
    fn update_home_item(&self, couple: CoupleId, item: &HomeItem) -> PlannerResult<()>;
    fn delete_home_item(&self, couple: CoupleId, id: HomeItemId) -> PlannerResult<bool>;
}

/// File-backed gateway
pub struct JsonGateway {
    paths: Option<PlannerPaths>,
    pub couples: CoupleRepository,
    pub wedding_costs: ScopedRepository<WeddingCostLine>,
    pub housing: HousingRepository,
    pub recurring_costs: ScopedRepository<RecurringCost>,
    pub home_items: ScopedRepository<HomeItem>,
}

impl JsonGateway {
    /// Open the gateway under `paths`, creating directories and loading every file
    pub fn open(paths: PlannerPaths) -> PlannerResult<Self> {
        paths.ensure_directories()?;

        let gateway = Self {
            couples: CoupleRepository::new(Some(paths.couples_file())),
            wedding_costs: ScopedRepository::new(Some(paths.wedding_costs_file())),
            housing: HousingRepository::new(Some(paths.housing_file())),
            recurring_costs: ScopedRepository::new(Some(paths.recurring_costs_file())),
            home_items: ScopedRepository::new(Some(paths.home_items_file())),
            paths: Some(paths),
        };
        gateway.load_all()?;
        debug!("opened json gateway");
        Ok(gateway)
    }

    /// Gateway that keeps everything in memory
    pub fn in_memory() -> Self {
        Self {
            paths: None,
            couples: CoupleRepository::new(None),
            wedding_costs: ScopedRepository::new(None),
            housing: HousingRepository::new(None),
            recurring_costs: ScopedRepository::new(None),
            home_items: ScopedRepository::new(None),
        }
    }

    pub fn paths(&self) -> Option<&PlannerPaths> {
        self.paths.as_ref()
    }

    /// Reload all data from disk
    pub fn load_all(&self) -> PlannerResult<()> {
        self.couples.load()?;
        self.wedding_costs.load()?;
        self.housing.load()?;
        self.recurring_costs.load()?;
        self.home_items.load()?;
        Ok(())
    }

    fn require_couple(&self, couple: CoupleId) -> PlannerResult<()> {
        if self.couples.exists(couple)? {
            Ok(())
        } else {
            Err(PlannerError::couple_not_found(couple.to_string()))
        }
    }
}

impl DataGateway for JsonGateway {
    fn list_couples(&self) -> PlannerResult<Vec<CoupleProfile>> {
        self.couples.get_all()
    }

    fn create_couple(&self, profile: CoupleProfile) -> PlannerResult<CoupleProfile> {
        if self.couples.exists(profile.id)? {
            return Err(PlannerError::Duplicate {
                entity_type: "Couple",
                identifier: profile.id.to_string(),
            });
        }
        self.couples.upsert(profile.clone())?;
        self.couples.save()?;
        Ok(profile)
    }

    fn get_couple(&self, id: CoupleId) -> PlannerResult<Option<CoupleProfile>> {
        self.couples.get(id)
    }

    fn update_couple(&self, profile: &CoupleProfile) -> PlannerResult<()> {
        self.require_couple(profile.id)?;
        self.couples.upsert(profile.clone())?;
        self.couples.save()
    }

    fn list_wedding_costs(&self, couple: CoupleId) -> PlannerResult<Vec<WeddingCostLine>> {
        self.wedding_costs.list(couple)
    }

    fn save_all_wedding_costs(
        &self,
        couple: CoupleId,
        lines: &[WeddingCostLine],
    ) -> PlannerResult<()> {
        self.require_couple(couple)?;

        let existing = self.wedding_costs.list(couple)?;
        let merged: Vec<WeddingCostLine> = lines
            .iter()
            .map(|line| {
                let mut line = line.clone();
                if line.notes.is_none() {
                    line.notes = existing
                        .iter()
                        .find(|old| old.category == line.category)
                        .and_then(|old| old.notes.clone());
                }
                line
            })
            .collect();

        let previous = self.wedding_costs.replace_all(couple, merged)?;
        if let Err(e) = self.wedding_costs.save() {
            // Keep memory consistent with what is on disk
            self.wedding_costs.replace_all(couple, previous)?;
            return Err(e);
        }

        debug!(couple = %couple, rows = lines.len(), "replaced wedding cost rows");
        Ok(())
    }

    fn get_housing(&self, couple: CoupleId) -> PlannerResult<Option<HousingConfig>> {
        self.housing.get(couple)
    }

    fn upsert_housing(&self, couple: CoupleId, config: &HousingConfig) -> PlannerResult<()> {
        self.require_couple(couple)?;
        self.housing.upsert(couple, config.clone())?;
        self.housing.save()
    }

    fn list_recurring_costs(&self, couple: CoupleId) -> PlannerResult<Vec<RecurringCost>> {
        self.recurring_costs.list(couple)
    }

    fn add_recurring_cost(&self, couple: CoupleId, cost: &RecurringCost) -> PlannerResult<()> {
        self.require_couple(couple)?;
        self.recurring_costs.insert(couple, cost.clone())?;
        self.recurring_costs.save()
    }

    fn update_recurring_cost(&self, couple: CoupleId, cost: &RecurringCost) -> PlannerResult<()> {
        if !self.recurring_costs.update(couple, cost.clone())? {
            return Err(PlannerError::recurring_cost_not_found(cost.id.to_string()));
        }
        self.recurring_costs.save()
    }

    fn delete_recurring_cost(&self, couple: CoupleId, id: RecurringCostId) -> PlannerResult<bool> {
        let removed = self.recurring_costs.remove(couple, &id)?;
        if removed {
            self.recurring_costs.save()?;
        }
        Ok(removed)
    }

    fn list_home_items(&self, couple: CoupleId) -> PlannerResult<Vec<HomeItem>> {
        self.home_items.list(couple)
    }

    fn add_home_item(&self, couple: CoupleId, item: &HomeItem) -> PlannerResult<()> {
        self.require_couple(couple)?;
        self.home_items.insert(couple, item.clone())?;
        self.home_items.save()
    }

    fn update_home_item(&self, couple: CoupleId, item: &HomeItem) -> PlannerResult<()> {
        if !self.home_items.update(couple, item.clone())? {
            return Err(PlannerError::home_item_not_found(item.id.to_string()));
        }
        self.home_items.save()
    }

    fn delete_home_item(&self, couple: CoupleId, id: HomeItemId) -> PlannerResult<bool> {
        let removed = self.home_items.remove(couple, &id)?;
        if removed {
            self.home_items.save()?;
        }
        Ok(removed)
    }
}
