//! Home furnishing checklist service
//!
//! CRUD over home items plus filtering and the progress/savings statistics
//! shown on the checklist.

use chrono::Utc;
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};
use crate::gateway::DataGateway;
use crate::models::{CoupleId, HomeItem, HomeItemId, ItemStatus, ItemType, Money, Priority, Room};

/// Fields for a new item
#[derive(Debug, Clone)]
pub struct NewHomeItem {
    pub name: String,
    pub room: Room,
    pub item_type: ItemType,
    pub estimated_price: Money,
    pub actual_price: Money,
    pub priority: Priority,
    pub store_link: Option<String>,
    pub notes: Option<String>,
    pub is_gifted: bool,
}

impl NewHomeItem {
    pub fn new(name: impl Into<String>, room: Room, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            room,
            item_type,
            estimated_price: Money::zero(),
            actual_price: Money::zero(),
            priority: Priority::default(),
            store_link: None,
            notes: None,
            is_gifted: false,
        }
    }
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct HomeItemUpdate {
    pub name: Option<String>,
    pub room: Option<Room>,
    pub item_type: Option<ItemType>,
    pub estimated_price: Option<Money>,
    pub actual_price: Option<Money>,
    pub priority: Option<Priority>,
    pub store_link: Option<String>,
    pub notes: Option<String>,
    pub is_gifted: Option<bool>,
}

/// Checklist filter; every set field must match
#[derive(Debug, Clone, Default)]
pub struct HomeItemFilter {
    /// Case-insensitive substring of the item name
    pub search: Option<String>,
    pub room: Option<Room>,
    pub item_type: Option<ItemType>,
    pub status: Option<ItemStatus>,
}

impl HomeItemFilter {
    pub fn matches(&self, item: &HomeItem) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                item.name.to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        };
        search_ok
            && self.room.map_or(true, |room| item.room == room)
            && self.item_type.map_or(true, |kind| item.item_type == kind)
            && self.status.map_or(true, |status| item.status == status)
    }
}

/// Totals for one room or one item type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotals<K> {
    pub group: K,
    pub count: usize,
    pub estimated: Money,
    pub actual: Money,
}

/// Checklist statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeStats {
    pub total_items: usize,
    pub purchased_items: usize,
    pub pending_items: usize,
    pub total_estimated: Money,
    /// Actual spend, excluding gifted items
    pub total_actual: Money,
    pub gifted_items: usize,
    /// Estimated value of gifted items
    pub gifted_savings: Money,
    pub by_room: Vec<GroupTotals<Room>>,
    pub by_type: Vec<GroupTotals<ItemType>>,
    pub progress_percent: i64,
    /// Estimated minus actual (negative when over budget)
    pub savings: Money,
    pub savings_percent: i64,
}

impl HomeStats {
    pub fn from_items(items: &[HomeItem]) -> Self {
        let total_items = items.len();
        let purchased_items = items.iter().filter(|i| i.is_purchased()).count();
        let total_estimated: Money = items.iter().map(|i| i.estimated_price).sum();
        let total_actual: Money = items
            .iter()
            .filter(|i| !i.is_gifted)
            .map(|i| i.actual_price)
            .sum();
        let gifted: Vec<&HomeItem> = items.iter().filter(|i| i.is_gifted).collect();
        let savings = total_estimated - total_actual;

        Self {
            total_items,
            purchased_items,
            pending_items: total_items - purchased_items,
            total_estimated,
            total_actual,
            gifted_items: gifted.len(),
            gifted_savings: gifted.iter().map(|i| i.estimated_price).sum(),
            by_room: group_totals(items, Room::all(), |i| i.room),
            by_type: group_totals(items, ItemType::all(), |i| i.item_type),
            progress_percent: rounded_percent(purchased_items as f64, total_items as f64),
            savings,
            savings_percent: rounded_percent(savings.to_f64(), total_estimated.to_f64()),
        }
    }
}

fn group_totals<K, F>(items: &[HomeItem], groups: &[K], key: F) -> Vec<GroupTotals<K>>
where
    K: Copy + PartialEq,
    F: Fn(&HomeItem) -> K,
{
    groups
        .iter()
        .map(|group| {
            let members: Vec<&HomeItem> = items.iter().filter(|i| key(*i) == *group).collect();
            GroupTotals {
                group: *group,
                count: members.len(),
                estimated: members.iter().map(|i| i.estimated_price).sum(),
                actual: members.iter().map(|i| i.actual_price).sum(),
            }
        })
        .filter(|totals| totals.count > 0)
        .collect()
}

fn rounded_percent(part: f64, whole: f64) -> i64 {
    if whole == 0.0 {
        0
    } else {
        (part / whole * 100.0).round() as i64
    }
}

pub struct HomeItemService<'a> {
    gateway: &'a dyn DataGateway,
}

impl<'a> HomeItemService<'a> {
    pub fn new(gateway: &'a dyn DataGateway) -> Self {
        Self { gateway }
    }

    pub fn add(&self, couple: CoupleId, new_item: NewHomeItem) -> PlannerResult<HomeItem> {
        let name = validate_name(&new_item.name)?;

        let mut item = HomeItem::new(name, new_item.room, new_item.item_type);
        item.estimated_price = new_item.estimated_price;
        item.actual_price = new_item.actual_price;
        item.priority = new_item.priority;
        item.store_link = clean_optional(new_item.store_link);
        item.notes = clean_optional(new_item.notes);
        item.is_gifted = new_item.is_gifted;

        self.gateway.add_home_item(couple, &item)?;
        debug!(couple = %couple, item = %item.id, "added home item");
        Ok(item)
    }

    pub fn update(
        &self,
        couple: CoupleId,
        id: HomeItemId,
        update: HomeItemUpdate,
    ) -> PlannerResult<HomeItem> {
        let mut item = self.get(couple, id)?;

        if let Some(name) = update.name {
            item.name = validate_name(&name)?;
        }
        if let Some(room) = update.room {
            item.room = room;
        }
        if let Some(kind) = update.item_type {
            item.item_type = kind;
        }
        if let Some(price) = update.estimated_price {
            item.estimated_price = price;
        }
        if let Some(price) = update.actual_price {
            item.actual_price = price;
        }
        if let Some(priority) = update.priority {
            item.priority = priority;
        }
        if update.store_link.is_some() {
            item.store_link = clean_optional(update.store_link);
        }
        if update.notes.is_some() {
            item.notes = clean_optional(update.notes);
        }
        if let Some(gifted) = update.is_gifted {
            item.is_gifted = gifted;
        }
        item.updated_at = Utc::now();

        self.gateway.update_home_item(couple, &item)?;
        Ok(item)
    }

    /// Flip pending/purchased, stamping or clearing the purchase time
    pub fn toggle_status(&self, couple: CoupleId, id: HomeItemId) -> PlannerResult<HomeItem> {
        let mut item = self.get(couple, id)?;
        item.toggle_status();
        self.gateway.update_home_item(couple, &item)?;
        debug!(item = %id, status = %item.status, "toggled home item");
        Ok(item)
    }

    pub fn delete(&self, couple: CoupleId, id: HomeItemId) -> PlannerResult<HomeItem> {
        let item = self.get(couple, id)?;
        self.gateway.delete_home_item(couple, id)?;
        Ok(item)
    }

    pub fn get(&self, couple: CoupleId, id: HomeItemId) -> PlannerResult<HomeItem> {
        self.list(couple)?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or_else(|| PlannerError::home_item_not_found(id.to_string()))
    }

    /// Find an item by short id (`itm-1a2b3c4d`) or case-insensitive name
    pub fn find(&self, couple: CoupleId, identifier: &str) -> PlannerResult<HomeItem> {
        let identifier = identifier.trim();
        let items = self.list(couple)?;

        if let Some(item) = items.iter().find(|i| i.name.eq_ignore_ascii_case(identifier)) {
            return Ok(item.clone());
        }

        let mut matches = items.into_iter().filter(|i| i.id.matches_short(identifier));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item),
            (Some(_), Some(_)) => Err(PlannerError::Validation(format!(
                "'{}' matches more than one item",
                identifier
            ))),
            _ => Err(PlannerError::home_item_not_found(identifier)),
        }
    }

    pub fn list(&self, couple: CoupleId) -> PlannerResult<Vec<HomeItem>> {
        self.gateway.list_home_items(couple)
    }

    pub fn filter(&self, couple: CoupleId, filter: &HomeItemFilter) -> PlannerResult<Vec<HomeItem>> {
        Ok(self
            .list(couple)?
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect())
    }

    pub fn stats(&self, couple: CoupleId) -> PlannerResult<HomeStats> {
        Ok(HomeStats::from_items(&self.list(couple)?))
    }
}

fn validate_name(name: &str) -> PlannerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlannerError::Validation("Item name cannot be empty".into()));
    }
    Ok(name.to_string())
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
