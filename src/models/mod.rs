//! Core data models for Couple Planner
//!
//! This module contains all the data structures that represent the planning
//! domain: the couple profile, wedding budget lines, housing, recurring costs
//! and the home furnishing checklist.

pub mod couple;
pub mod home_item;
pub mod housing;
pub mod ids;
pub mod money;
pub mod recurring;
pub mod wedding;

pub use couple::{CoupleProfile, InvitationStatus};
pub use home_item::{HomeItem, ItemStatus, ItemType, Priority, Room};
pub use housing::{HousingConfig, HousingType};
pub use ids::{CoupleId, HomeItemId, RecurringCostId};
pub use money::{Money, MoneyParseError};
pub use recurring::RecurringCost;
pub use wedding::{BuiltinCategory, CalculatorMode, Scenario, WeddingCostLine};
