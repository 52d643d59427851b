//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod dashboard;
pub mod home;
pub mod housing;
pub mod profile;
pub mod recurring;
pub mod wedding;

pub use dashboard::{handle_projection_command, handle_summary_command};
pub use home::{handle_home_command, HomeCommands};
pub use housing::{handle_housing_command, HousingCommands};
pub use profile::{handle_profile_command, ProfileCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use wedding::{handle_wedding_command, WeddingCommands};

use crate::error::{PlannerError, PlannerResult};
use crate::models::Money;

/// Parse a user-typed amount such as "1500" or "R$ 1500.00"; negatives are rejected
pub(crate) fn parse_amount(input: &str, what: &str) -> PlannerResult<Money> {
    let amount = Money::parse(input)
        .map_err(|e| PlannerError::Validation(format!("Invalid {}: {}", what, e)))?;
    if amount.is_negative() {
        return Err(PlannerError::Validation(format!("{} cannot be negative", what)));
    }
    Ok(amount)
}

pub(crate) fn parse_optional_amount(input: Option<&str>, what: &str) -> PlannerResult<Option<Money>> {
    input.map(|s| parse_amount(s, what)).transpose()
}
