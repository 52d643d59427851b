//! Recurring cost service

use chrono::Utc;
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};
use crate::gateway::DataGateway;
use crate::models::{CoupleId, Money, RecurringCost, RecurringCostId};

pub struct RecurringCostService<'a> {
    gateway: &'a dyn DataGateway,
}

impl<'a> RecurringCostService<'a> {
    pub fn new(gateway: &'a dyn DataGateway) -> Self {
        Self { gateway }
    }

    /// Add a monthly cost
    pub fn add(
        &self,
        couple: CoupleId,
        name: &str,
        amount: Money,
        category: Option<&str>,
    ) -> PlannerResult<RecurringCost> {
        let mut cost = RecurringCost::new(name.trim(), amount);
        if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
            cost.category = category.to_lowercase();
        }
        cost.validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.gateway.add_recurring_cost(couple, &cost)?;
        debug!(couple = %couple, cost = %cost.id, "added recurring cost");
        Ok(cost)
    }

    /// Change any of name, amount and category
    pub fn update(
        &self,
        couple: CoupleId,
        id: RecurringCostId,
        name: Option<&str>,
        amount: Option<Money>,
        category: Option<&str>,
    ) -> PlannerResult<RecurringCost> {
        let mut cost = self.get(couple, id)?;

        if let Some(name) = name {
            cost.name = name.trim().to_string();
        }
        if let Some(amount) = amount {
            cost.amount = amount;
        }
        if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
            cost.category = category.to_lowercase();
        }
        cost.validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;
        cost.updated_at = Utc::now();

        self.gateway.update_recurring_cost(couple, &cost)?;
        Ok(cost)
    }

    pub fn delete(&self, couple: CoupleId, id: RecurringCostId) -> PlannerResult<RecurringCost> {
        let cost = self.get(couple, id)?;
        self.gateway.delete_recurring_cost(couple, id)?;
        debug!(couple = %couple, cost = %id, "deleted recurring cost");
        Ok(cost)
    }

    pub fn get(&self, couple: CoupleId, id: RecurringCostId) -> PlannerResult<RecurringCost> {
        self.list(couple)?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| PlannerError::recurring_cost_not_found(id.to_string()))
    }

    /// Find a cost by short id (`rec-1a2b3c4d`) or case-insensitive name
    pub fn find(&self, couple: CoupleId, identifier: &str) -> PlannerResult<RecurringCost> {
        let identifier = identifier.trim();
        let costs = self.list(couple)?;

        if let Some(cost) = costs.iter().find(|c| c.name.eq_ignore_ascii_case(identifier)) {
            return Ok(cost.clone());
        }

        let mut matches = costs.into_iter().filter(|c| c.id.matches_short(identifier));
        match (matches.next(), matches.next()) {
            (Some(cost), None) => Ok(cost),
            (Some(_), Some(_)) => Err(PlannerError::Validation(format!(
                "'{}' matches more than one recurring cost",
                identifier
            ))),
            _ => Err(PlannerError::recurring_cost_not_found(identifier)),
        }
    }

    pub fn list(&self, couple: CoupleId) -> PlannerResult<Vec<RecurringCost>> {
        self.gateway.list_recurring_costs(couple)
    }

    /// Sum of all monthly costs
    pub fn total(&self, couple: CoupleId) -> PlannerResult<Money> {
        Ok(self.list(couple)?.iter().map(|c| c.amount).sum())
    }
}
