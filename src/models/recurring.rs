//! Recurring monthly cost model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::RecurringCostId;
use super::money::Money;

/// Category assigned when the user does not pick one
pub const DEFAULT_RECURRING_CATEGORY: &str = "other";

/// A monthly cost such as internet, groceries or a gym plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringCost {
    pub id: RecurringCostId,
    pub name: String,
    pub amount: Money,
    #[serde(default = "default_category")]
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_RECURRING_CATEGORY.to_string()
}

impl RecurringCost {
    /// Create a new recurring cost in the default category
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringCostId::new(),
            name: name.into(),
            amount,
            category: default_category(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the cost
    pub fn validate(&self) -> Result<(), RecurringCostValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecurringCostValidationError::EmptyName);
        }
        if self.name.len() > 80 {
            return Err(RecurringCostValidationError::NameTooLong(self.name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for RecurringCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for recurring costs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringCostValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for RecurringCostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Recurring cost name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Recurring cost name too long ({} chars, max 80)", len)
            }
        }
    }
}

impl std::error::Error for RecurringCostValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recurring_cost() {
        let cost = RecurringCost::new("Internet", Money::from_units(120));
        assert_eq!(cost.category, "other");
        assert!(cost.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut cost = RecurringCost::new("  ", Money::zero());
        assert_eq!(cost.validate(), Err(RecurringCostValidationError::EmptyName));

        cost.name = "x".repeat(81);
        assert!(matches!(
            cost.validate(),
            Err(RecurringCostValidationError::NameTooLong(81))
        ));
    }
}
