//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; callers decide where it goes.

pub mod dashboard;
pub mod home;
pub mod household;
pub mod wedding;

pub use dashboard::{format_projection, format_viability};
pub use home::{format_home_items, format_home_stats};
pub use household::{format_housing, format_profile, format_recurring_list};
pub use wedding::{format_scenarios, format_wedding_budget};
