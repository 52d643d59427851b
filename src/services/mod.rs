//! Service layer for Couple Planner
//!
//! Business logic on top of the data gateway: validation, derived values and
//! the wedding budget staging editor.

pub mod couple;
pub mod dashboard;
pub mod home_items;
pub mod housing;
pub mod recurring;
pub mod wedding_budget;

pub use couple::CoupleService;
pub use dashboard::{DashboardService, Projection, ProjectionPoint, Viability, ViabilityStatus};
pub use home_items::{HomeItemFilter, HomeItemService, HomeItemUpdate, HomeStats, NewHomeItem};
pub use housing::{HousingComparison, HousingService, HousingUpdate};
pub use recurring::RecurringCostService;
pub use wedding_budget::{
    AmountField, CategoryKeyPolicy, Direction, EditState, LabelAsKey, RefreshOutcome, SaveOutcome,
    StagedCategory, WeddingBudgetEditor, JUST_SAVED_FOR,
};
