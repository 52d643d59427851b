//! Home furnishing checklist model
//!
//! Items the couple needs for their new home, grouped by room and type,
//! with estimated and actual prices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::HomeItemId;
use super::money::Money;

/// Room an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    Laundry,
    Office,
    Balcony,
    Other,
}

impl Room {
    /// All rooms in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::LivingRoom,
            Self::Bedroom,
            Self::Kitchen,
            Self::Bathroom,
            Self::Laundry,
            Self::Office,
            Self::Balcony,
            Self::Other,
        ]
    }

    /// Storage key
    pub fn key(&self) -> &'static str {
        match self {
            Self::LivingRoom => "living_room",
            Self::Bedroom => "bedroom",
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::Laundry => "laundry",
            Self::Office => "office",
            Self::Balcony => "balcony",
            Self::Other => "other",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::LivingRoom => "Living Room",
            Self::Bedroom => "Bedroom",
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::Laundry => "Laundry",
            Self::Office => "Office",
            Self::Balcony => "Balcony",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Room {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::all()
            .iter()
            .copied()
            .find(|room| room.key() == wanted)
            .ok_or_else(|| format!("Unknown room '{}'", s.trim()))
    }
}

/// Kind of item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Furniture,
    Appliances,
    Decor,
    Utensils,
    Electronics,
    Other,
}

impl ItemType {
    /// All item types in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Furniture,
            Self::Appliances,
            Self::Decor,
            Self::Utensils,
            Self::Electronics,
            Self::Other,
        ]
    }

    /// Storage key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Furniture => "furniture",
            Self::Appliances => "appliances",
            Self::Decor => "decor",
            Self::Utensils => "utensils",
            Self::Electronics => "electronics",
            Self::Other => "other",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Furniture => "Furniture",
            Self::Appliances => "Appliances",
            Self::Decor => "Decor",
            Self::Utensils => "Utensils",
            Self::Electronics => "Electronics",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.key() == wanted)
            .ok_or_else(|| format!("Unknown item type '{}'", s.trim()))
    }
}

/// Purchase status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Purchased,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Purchased => write!(f, "Purchased"),
        }
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "purchased" | "bought" => Ok(Self::Purchased),
            other => Err(format!("Unknown status '{}'. Use pending or purchased.", other)),
        }
    }
}

/// Purchase priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("Unknown priority '{}'. Use low, medium or high.", other)),
        }
    }
}

/// An item on the home furnishing checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeItem {
    pub id: HomeItemId,
    pub name: String,
    pub room: Room,
    pub item_type: ItemType,
    #[serde(default)]
    pub estimated_price: Money,
    #[serde(default)]
    pub actual_price: Money,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub store_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub purchased_at: Option<DateTime<Utc>>,
    /// Received as a gift; its actual price is not money the couple spent
    #[serde(default)]
    pub is_gifted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HomeItem {
    /// Create a pending, medium-priority item
    pub fn new(name: impl Into<String>, room: Room, item_type: ItemType) -> Self {
        let now = Utc::now();
        Self {
            id: HomeItemId::new(),
            name: name.into(),
            room,
            item_type,
            estimated_price: Money::zero(),
            actual_price: Money::zero(),
            status: ItemStatus::Pending,
            priority: Priority::Medium,
            store_link: None,
            notes: None,
            purchased_at: None,
            is_gifted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the item has been bought
    pub fn is_purchased(&self) -> bool {
        self.status == ItemStatus::Purchased
    }

    /// Flip between pending and purchased, stamping the purchase time
    pub fn toggle_status(&mut self) {
        let now = Utc::now();
        match self.status {
            ItemStatus::Pending => {
                self.status = ItemStatus::Purchased;
                self.purchased_at = Some(now);
            }
            ItemStatus::Purchased => {
                self.status = ItemStatus::Pending;
                self.purchased_at = None;
            }
        }
        self.updated_at = now;
    }
}

impl fmt::Display for HomeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
